//! Application state for dependency injection.

use std::sync::Arc;

use account_service_lib::infra::Database;
use account_service_lib::service::AccountService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountService>,
    /// Connection used by the health check; absent when the service runs
    /// over a non-database store.
    pub database: Option<Database>,
}

impl AppState {
    /// Create new app state.
    pub fn new(accounts: Arc<dyn AccountService>, database: Option<Database>) -> Self {
        Self { accounts, database }
    }
}
