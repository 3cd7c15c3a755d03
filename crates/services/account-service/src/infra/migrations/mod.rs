//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_accounts_table;
mod m20240101_000002_seed_admin_account;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_accounts_table::Migration),
            Box::new(m20240101_000002_seed_admin_account::Migration),
        ]
    }
}

/// Column identifiers shared by the account migrations.
#[derive(Iden)]
pub(crate) enum Accounts {
    Table,
    Id,
    Login,
    Password,
    Name,
    Gender,
    Birthday,
    IsAdmin,
    CreatedOn,
    CreatedBy,
    ModifiedOn,
    ModifiedBy,
    RevokedOn,
    RevokedBy,
    Version,
}
