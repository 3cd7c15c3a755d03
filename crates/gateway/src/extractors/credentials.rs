//! Credential header extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use account_service_lib::service::Credentials;
use common::AppError;
use domain::{HEADER_LOGIN, HEADER_PASSWORD};

/// Credentials taken from the `Login` and `Password` request headers.
///
/// A missing or non-UTF-8 header counts as a failed verification.
#[derive(Debug, Clone)]
pub struct AuthHeaders(pub Credentials);

#[async_trait]
impl<S> FromRequestParts<S> for AuthHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .ok_or(AppError::InvalidCredentials)
        };

        let login = header(HEADER_LOGIN)?;
        let password = header(HEADER_PASSWORD)?;

        Ok(AuthHeaders(Credentials::new(login, password)))
    }
}
