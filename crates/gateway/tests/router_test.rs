//! HTTP surface tests driven through the router with an in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use account_service_lib::repository::InMemoryAccountStore;
use account_service_lib::service::AccountManager;
use domain::FixedClock;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

fn app() -> Router {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let store = Arc::new(InMemoryAccountStore::seeded(now));
    let clock = Arc::new(FixedClock::new(now));
    let service = Arc::new(AccountManager::new(store, clock));
    create_router(AppState::new(service, None))
}

const ADMIN: (&str, &str) = ("Admin", "Admin");
const BOB: (&str, &str) = ("bob", "pass1");

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    credentials: Option<(&str, &str)>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((login, password)) = credentials {
        builder = builder.header("Login", login).header("Password", password);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_bob(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/Users/Create",
        Some(ADMIN),
        Some(json!({"login": "bob", "password": "pass1", "name": "Bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_list_all_needs_no_credentials_and_hides_passwords() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/Users", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let accounts = body.as_array().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0]["login"], "Admin");
    assert_eq!(accounts[0]["isAdmin"], true);
    assert!(accounts[0].get("password").is_none());
}

#[tokio::test]
async fn test_missing_headers_are_invalid_credentials() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/Users/Read/ReadByMe", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_create_then_read_by_login() {
    let app = app();
    let created = create_bob(&app).await;
    assert_eq!(created["login"], "bob");
    assert_eq!(created["createdBy"], "Admin");
    assert_eq!(created["gender"], 2);

    let (status, body) = send(
        &app,
        Method::GET,
        "/Users/Read/ReadByLogin/bob",
        Some(ADMIN),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"name": "Bob", "gender": 2, "birthday": null, "revokedOn": null})
    );
}

#[tokio::test]
async fn test_read_by_login_unknown_is_404() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/Users/Read/ReadByLogin/nobody",
        Some(ADMIN),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_rejects_bad_name_and_duplicates() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/Users/Create",
        Some(ADMIN),
        Some(json!({"login": "carl", "password": "pass3", "name": "123"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    create_bob(&app).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/Users/Create",
        Some(ADMIN),
        Some(json!({"login": "bob", "password": "other1", "name": "Bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_LOGIN");

    let (_, all) = send(&app, Method::GET, "/Users", None, None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/Users/Create",
        Some(ADMIN),
        Some(json!({"login": "bob"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_soft_delete_and_restore_cycle() {
    let app = app();
    create_bob(&app).await;

    let (status, _) = send(&app, Method::DELETE, "/Users/Delete/bob/soft", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, "/Users/Read/ReadByMe", Some(BOB), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_RIGHTS");

    let (_, active) = send(&app, Method::GET, "/Users/Read/ReadByAllUsers", Some(ADMIN), None).await;
    assert_eq!(active.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::PUT, "/Users/Update-2/bob", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, active) = send(&app, Method::GET, "/Users/Read/ReadByAllUsers", Some(ADMIN), None).await;
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 2);
    assert_eq!(active[1]["login"], "bob");
    assert!(active[1]["revokedOn"].is_null());
}

#[tokio::test]
async fn test_unknown_delete_mode_is_rejected() {
    let app = app();
    create_bob(&app).await;

    let (status, body) = send(&app, Method::DELETE, "/Users/Delete/bob/medium", Some(ADMIN), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_DELETE_MODE");

    let (_, summary) = send(&app, Method::GET, "/Users/Read/ReadByLogin/bob", Some(ADMIN), None).await;
    assert!(summary["revokedOn"].is_null());
}

#[tokio::test]
async fn test_self_service_updates() {
    let app = app();
    create_bob(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/Users/Update-1/UpdateNameGenderBirthday",
        Some(BOB),
        Some(json!({"login": "bob", "gender": 1, "birthday": "1990-05-17"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["gender"], 1);
    assert_eq!(body["birthday"], "1990-05-17");
    assert_eq!(body["name"], "Bob");
    assert_eq!(body["modifiedBy"], "bob");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/Users/Update-1/UpdateLogin",
        Some(BOB),
        Some(json!({"login": "bob", "newLogin": "robert"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["login"], "robert");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/Users/Update-1/UpdatePassword",
        Some(("robert", "pass1")),
        Some(json!({"login": "robert", "password": "pass2"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::GET,
        "/Users/Read/ReadByMe",
        Some(("robert", "pass2")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["login"], "robert");
}

#[tokio::test]
async fn test_user_cannot_update_another_account() {
    let app = app();
    create_bob(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/Users/Update-1/UpdateLogin",
        Some(BOB),
        Some(json!({"login": "Admin", "newLogin": "root"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_RIGHTS");
}

#[tokio::test]
async fn test_read_by_age_requires_integer() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/Users/Read/ReadByAge/abc", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/Users/Read/ReadByAge/18", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_health_without_database_is_degraded() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_openapi_declares_header_credentials() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let schemes = &body["components"]["securitySchemes"];
    assert_eq!(schemes["login"]["name"], "Login");
    assert_eq!(schemes["password"]["in"], "header");
    assert!(body["paths"]["/Users/Delete/{login}/{mode}"].is_object());
}

#[tokio::test]
async fn test_null_birthday_clears_it() {
    let app = app();
    create_bob(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/Users/Update-1/UpdateNameGenderBirthday",
        Some(BOB),
        Some(json!({"login": "bob", "birthday": "1990-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["birthday"], "1990-01-01");

    // Omitted birthday keeps the stored value
    let (_, body) = send(
        &app,
        Method::PUT,
        "/Users/Update-1/UpdateNameGenderBirthday",
        Some(BOB),
        Some(json!({"login": "bob", "gender": 0})),
    )
    .await;
    assert_eq!(body["birthday"], "1990-01-01");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/Users/Update-1/UpdateNameGenderBirthday",
        Some(BOB),
        Some(json!({"login": "bob", "birthday": null})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["birthday"].is_null());
    assert_eq!(body["gender"], 0);
}

#[tokio::test]
async fn test_credentials_checked_before_field_rules() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/Users/Create",
        None,
        Some(json!({"login": "", "password": "", "name": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");

    // Authenticated, the empty login fails domain validation
    let (status, body) = send(
        &app,
        Method::POST,
        "/Users/Create",
        Some(ADMIN),
        Some(json!({"login": "", "password": "pass1", "name": "Bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
