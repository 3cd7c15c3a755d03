//! OpenAPI documentation.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::account_handler::{
    CreateAccountRequest, UpdateLoginRequest, UpdatePasswordRequest, UpdateProfileRequest,
};
use domain::{AccountResponse, AccountSummary, HEADER_LOGIN, HEADER_PASSWORD};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::account_handler::list_all,
        crate::handlers::account_handler::read_own,
        crate::handlers::account_handler::read_by_age,
        crate::handlers::account_handler::list_active,
        crate::handlers::account_handler::read_by_login,
        crate::handlers::account_handler::create_account,
        crate::handlers::account_handler::restore_account,
        crate::handlers::account_handler::update_profile,
        crate::handlers::account_handler::update_password,
        crate::handlers::account_handler::update_login,
        crate::handlers::account_handler::delete_account,
    ),
    components(
        schemas(
            AccountResponse,
            AccountSummary,
            CreateAccountRequest,
            UpdateProfileRequest,
            UpdatePasswordRequest,
            UpdateLoginRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Account directory endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier: credentials travel as two plain headers.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "login",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(HEADER_LOGIN))),
            );
            components.add_security_scheme(
                "password",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(HEADER_PASSWORD))),
            );
        }
    }
}
