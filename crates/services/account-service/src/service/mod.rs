//! Service layer - business logic.

mod account_service;
mod credentials;

pub use account_service::{AccountManager, AccountService};
pub use credentials::{CredentialVerifier, Credentials};
