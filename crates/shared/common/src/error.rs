//! Unified error handling for service results and HTTP responses.
//!
//! Provides a single error type that carries the account engine's error
//! taxonomy and converts into Axum HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Invalid login or password")]
    InvalidCredentials,

    #[error("Insufficient rights: {0}")]
    InsufficientRights(String),

    // Validation
    #[error("Invalid {field}: {rule}")]
    Validation { field: String, rule: String },

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Delete mode must be \"soft\" or \"hard\", got '{0}'")]
    InvalidDeleteMode(String),

    // Resource errors
    #[error("Account '{0}' not found")]
    NotFound(String),

    #[error("Login '{0}' already exists")]
    DuplicateLogin(String),

    #[error("Account was modified concurrently")]
    ConcurrencyConflict,

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::InsufficientRights(_) => "INSUFFICIENT_RIGHTS",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InvalidDeleteMode(_) => "INVALID_DELETE_MODE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DuplicateLogin(_) => "DUPLICATE_LOGIN",
            AppError::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::InsufficientRights(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Validation { .. }
            | AppError::BadRequest(_)
            | AppError::InvalidDeleteMode(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateLogin(_) | AppError::ConcurrencyConflict => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Client errors carry their own message
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::InsufficientRights(reason) => AppError::InsufficientRights(reason),
            DomainError::Validation { field, rule } => AppError::Validation {
                field: field.to_string(),
                rule,
            },
            DomainError::DuplicateLogin(login) => AppError::DuplicateLogin(login),
            DomainError::NotFound(login) => AppError::NotFound(login),
            DomainError::InvalidDeleteMode(mode) => AppError::InvalidDeleteMode(mode),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, login: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, login: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(login.to_string()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(field: impl Into<String>, rule: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            rule: rule.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Field;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InsufficientRights("record deleted".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::validation("name", "bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidDeleteMode("medium".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("bob".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::DuplicateLogin("bob".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::ConcurrencyConflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_validation_keeps_field() {
        let err = AppError::from(DomainError::validation(Field::Name, "letters only"));
        match err {
            AppError::Validation { field, rule } => {
                assert_eq!(field, "name");
                assert_eq!(rule, "letters only");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = AppError::internal("connection string leaked");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[tokio::test]
    async fn test_error_response_body() {
        let response = AppError::NotFound("bob".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Account 'bob' not found");
    }
}
