//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;

/// JSON extractor that automatically validates the payload.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        value.validate().map_err(|e| {
            // Report the first failing field
            e.field_errors()
                .into_iter()
                .next()
                .map(|(field, errors)| {
                    let rule = errors
                        .first()
                        .and_then(|error| error.message.as_ref())
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| "is invalid".to_string());
                    AppError::validation(field.to_string(), rule)
                })
                .unwrap_or_else(|| AppError::bad_request("Validation failed"))
        })?;

        Ok(ValidatedJson(value))
    }
}
