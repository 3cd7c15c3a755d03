//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::validation::Field;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Login/password pair does not match a stored account
    #[error("Invalid login or password")]
    InvalidCredentials,

    /// Caller is authenticated but not allowed to perform the operation
    #[error("Insufficient rights: {0}")]
    InsufficientRights(String),

    /// A field violated its character-set or enumeration rule
    #[error("Invalid {field}: {rule}")]
    Validation { field: Field, rule: String },

    /// Login is already taken by another (possibly revoked) account
    #[error("Login '{0}' already exists")]
    DuplicateLogin(String),

    /// Target account does not exist
    #[error("Account '{0}' not found")]
    NotFound(String),

    /// Delete mode is neither "soft" nor "hard"
    #[error("Delete mode must be \"soft\" or \"hard\", got '{0}'")]
    InvalidDeleteMode(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(field: Field, rule: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            rule: rule.into(),
        }
    }

    /// Create an insufficient rights error
    pub fn insufficient_rights(reason: impl Into<String>) -> Self {
        DomainError::InsufficientRights(reason.into())
    }

    /// Create a not found error
    pub fn not_found(login: impl Into<String>) -> Self {
        DomainError::NotFound(login.into())
    }

    /// Create a duplicate login error
    pub fn duplicate_login(login: impl Into<String>) -> Self {
        DomainError::DuplicateLogin(login.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
