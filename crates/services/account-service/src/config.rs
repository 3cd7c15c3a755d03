//! Account service configuration.

use common::DatabaseConfig;

/// Account service configuration.
#[derive(Debug, Clone, Default)]
pub struct AccountServiceConfig {
    pub database: DatabaseConfig,
}

impl AccountServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env("ACCOUNT_SERVICE_DATABASE_URL"),
        }
    }
}
