//! Account Service Library
//!
//! Account storage, credential verification, authorization and the account
//! lifecycle (create, update, soft/hard delete, restore). Embedded by the
//! HTTP gateway.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use domain::SystemClock;
use tracing::info;

use crate::config::AccountServiceConfig;
use crate::infra::Database;
use crate::repository::AccountStore;
use crate::service::{AccountManager, AccountService};

/// Connect to the configured database, apply pending migrations and build
/// the account service on top of it.
pub async fn connect(
    config: &AccountServiceConfig,
) -> Result<(Database, Arc<dyn AccountService>), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let service = build_service(&db);
    Ok((db, service))
}

/// Build the account service over an already connected database.
pub fn build_service(db: &Database) -> Arc<dyn AccountService> {
    let repo = Arc::new(AccountStore::new(db.get_connection()));
    Arc::new(AccountManager::new(repo, Arc::new(SystemClock)))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AccountServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
