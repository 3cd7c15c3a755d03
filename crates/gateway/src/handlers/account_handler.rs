//! Account handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{AccountResponse, AccountSummary, NewAccount, ProfileChanges};

use crate::extractors::{AuthHeaders, ValidatedJson};
use crate::state::AppState;

/// Account creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Latin letters and digits only
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    #[schema(example = "bob")]
    pub login: String,
    /// Latin letters and digits only
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    #[schema(example = "pass1")]
    pub password: String,
    /// Latin and Cyrillic letters only
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    #[schema(example = "Bob")]
    pub name: String,
    /// 0 female, 1 male, 2 unknown (default)
    #[schema(example = 1)]
    pub gender: Option<i32>,
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<CreateAccountRequest> for NewAccount {
    fn from(req: CreateAccountRequest) -> Self {
        NewAccount {
            login: req.login,
            password: req.password,
            name: req.name,
            gender: req.gender,
            birthday: req.birthday,
            is_admin: req.is_admin,
        }
    }
}

/// Profile update request; absent fields stay unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Login of the account to update
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    #[schema(example = "bob")]
    pub login: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub name: Option<String>,
    pub gender: Option<i32>,
    /// Explicit `null` clears the birthday
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = Date)]
    pub birthday: Option<Option<NaiveDate>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Password update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub login: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub password: String,
}

/// Login change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoginRequest {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub login: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    #[schema(example = "robert")]
    pub new_login: String,
}

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all))
        .route("/Read/ReadByMe", get(read_own))
        .route("/Read/ReadByAge/:age", get(read_by_age))
        .route("/Read/ReadByAllUsers", get(list_active))
        .route("/Read/ReadByLogin/:login", get(read_by_login))
        .route("/Create", post(create_account))
        .route("/Update-2/:login", put(restore_account))
        .route("/Update-1/UpdateNameGenderBirthday", put(update_profile))
        .route("/Update-1/UpdatePassword", put(update_password))
        .route("/Update-1/UpdateLogin", put(update_login))
        .route("/Delete/:login/:mode", delete(delete_account))
}

fn responses(accounts: Vec<domain::Account>) -> Vec<AccountResponse> {
    accounts.into_iter().map(AccountResponse::from).collect()
}

/// List every account
#[utoipa::path(
    get,
    path = "/Users",
    tag = "Users",
    responses(
        (status = 200, description = "All accounts, revoked ones included", body = Vec<AccountResponse>)
    )
)]
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = state.accounts.list_all().await?;
    Ok(Json(responses(accounts)))
}

/// Read the calling account
#[utoipa::path(
    get,
    path = "/Users/Read/ReadByMe",
    tag = "Users",
    security(("login" = [], "password" = [])),
    responses(
        (status = 200, description = "One-element list holding the caller", body = Vec<AccountResponse>),
        (status = 401, description = "Invalid credentials or record deleted")
    )
)]
pub async fn read_own(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = state.accounts.read_own(&credentials).await?;
    Ok(Json(responses(accounts)))
}

/// List accounts older than the given age (admin only)
#[utoipa::path(
    get,
    path = "/Users/Read/ReadByAge/{age}",
    tag = "Users",
    security(("login" = [], "password" = [])),
    params(
        ("age" = i32, Path, description = "Exclusive lower bound, in calendar years")
    ),
    responses(
        (status = 200, description = "Accounts with current year minus birth year above age", body = Vec<AccountResponse>),
        (status = 400, description = "Age is not an integer"),
        (status = 401, description = "Invalid credentials or not an administrator")
    )
)]
pub async fn read_by_age(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
    age: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let Path(age) = age.map_err(|e| AppError::bad_request(e.body_text()))?;
    let accounts = state.accounts.read_older_than(&credentials, age).await?;
    Ok(Json(responses(accounts)))
}

/// List accounts that are not revoked (admin only)
#[utoipa::path(
    get,
    path = "/Users/Read/ReadByAllUsers",
    tag = "Users",
    security(("login" = [], "password" = [])),
    responses(
        (status = 200, description = "Active accounts ordered by creation time", body = Vec<AccountResponse>),
        (status = 401, description = "Invalid credentials or not an administrator")
    )
)]
pub async fn list_active(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = state.accounts.list_active(&credentials).await?;
    Ok(Json(responses(accounts)))
}

/// Look up an account by login (admin only)
#[utoipa::path(
    get,
    path = "/Users/Read/ReadByLogin/{login}",
    tag = "Users",
    security(("login" = [], "password" = [])),
    params(
        ("login" = String, Path, description = "Account login")
    ),
    responses(
        (status = 200, description = "Name, gender, birthday and revocation time", body = AccountSummary),
        (status = 401, description = "Invalid credentials or not an administrator"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn read_by_login(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
    Path(login): Path<String>,
) -> AppResult<Json<AccountSummary>> {
    let summary = state.accounts.read_by_login(&credentials, &login).await?;
    Ok(Json(summary))
}

/// Create an account (admin only)
#[utoipa::path(
    post,
    path = "/Users/Create",
    tag = "Users",
    security(("login" = [], "password" = [])),
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid field value"),
        (status = 401, description = "Invalid credentials or not an administrator"),
        (status = 409, description = "Login already exists")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
    ValidatedJson(req): ValidatedJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state.accounts.create(&credentials, req.into()).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Restore a soft-deleted account (admin only)
#[utoipa::path(
    put,
    path = "/Users/Update-2/{login}",
    tag = "Users",
    security(("login" = [], "password" = [])),
    params(
        ("login" = String, Path, description = "Account login")
    ),
    responses(
        (status = 204, description = "Account restored"),
        (status = 401, description = "Invalid credentials or not an administrator"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn restore_account(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
    Path(login): Path<String>,
) -> AppResult<StatusCode> {
    state.accounts.restore(&credentials, &login).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change name, gender and/or birthday (self or admin)
#[utoipa::path(
    put,
    path = "/Users/Update-1/UpdateNameGenderBirthday",
    tag = "Users",
    security(("login" = [], "password" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 201, description = "Profile updated", body = AccountResponse),
        (status = 400, description = "Invalid field value"),
        (status = 401, description = "Invalid credentials, not the owner, or record deleted"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let changes = ProfileChanges {
        name: req.name,
        gender: req.gender,
        birthday: req.birthday,
    };
    let account = state
        .accounts
        .update_profile(&credentials, &req.login, changes)
        .await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Change password (self or admin)
#[utoipa::path(
    put,
    path = "/Users/Update-1/UpdatePassword",
    tag = "Users",
    security(("login" = [], "password" = [])),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 201, description = "Password updated", body = AccountResponse),
        (status = 400, description = "Invalid password"),
        (status = 401, description = "Invalid credentials, not the owner, or record deleted"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn update_password(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
    ValidatedJson(req): ValidatedJson<UpdatePasswordRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state
        .accounts
        .update_password(&credentials, &req.login, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Change login (self or admin)
#[utoipa::path(
    put,
    path = "/Users/Update-1/UpdateLogin",
    tag = "Users",
    security(("login" = [], "password" = [])),
    request_body = UpdateLoginRequest,
    responses(
        (status = 201, description = "Login changed", body = AccountResponse),
        (status = 400, description = "Invalid login"),
        (status = 401, description = "Invalid credentials, not the owner, or record deleted"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Login already exists")
    )
)]
pub async fn update_login(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
    ValidatedJson(req): ValidatedJson<UpdateLoginRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state
        .accounts
        .update_login(&credentials, &req.login, &req.new_login)
        .await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Soft or hard delete an account (admin only)
#[utoipa::path(
    delete,
    path = "/Users/Delete/{login}/{mode}",
    tag = "Users",
    security(("login" = [], "password" = [])),
    params(
        ("login" = String, Path, description = "Account login"),
        ("mode" = String, Path, description = "\"soft\" or \"hard\"")
    ),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Unknown delete mode"),
        (status = 401, description = "Invalid credentials or not an administrator"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthHeaders(credentials): AuthHeaders,
    Path((login, mode)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.accounts.delete(&credentials, &login, &mode).await?;
    Ok(StatusCode::NO_CONTENT)
}
