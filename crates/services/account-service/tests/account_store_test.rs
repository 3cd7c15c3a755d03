//! SeaORM store and migrations against an in-memory SQLite database.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use sea_orm::{ActiveValue::Set, EntityTrait};

use account_service_lib::infra::Database;
use account_service_lib::repository::entities::account::{ActiveModel, Entity as AccountEntity};
use account_service_lib::repository::{AccountRepository, AccountStore};
use common::{AppError, DatabaseConfig};
use domain::{Account, Gender, NewAccount};

async fn setup() -> (Database, AccountStore) {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        // one connection, otherwise every pooled connection sees its own database
        max_connections: 1,
        min_connections: 1,
    };
    let db = Database::connect(&config).await.unwrap();
    let store = AccountStore::new(db.get_connection());
    (db, store)
}

fn bob() -> Account {
    Account::create(
        NewAccount {
            login: "bob".to_string(),
            password: "pass1".to_string(),
            name: "Bob".to_string(),
            gender: Some(1),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
            is_admin: false,
        },
        "Admin",
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_migrations_seed_administrator() {
    let (db, store) = setup().await;

    let admin = store.find_by_login("Admin").await.unwrap().unwrap();
    assert!(admin.is_admin());
    assert!(admin.is_active());
    assert!(admin.password.matches("Admin"));
    assert_eq!(admin.gender, Gender::Unknown);

    let status = db.migration_status().await.unwrap();
    assert_eq!(status.len(), 2);
    assert!(status.iter().all(|(_, applied)| *applied));
    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_insert_and_read_back() {
    let (_db, store) = setup().await;
    let account = store.insert(bob()).await.unwrap();

    let loaded = store.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(loaded.login, "bob");
    assert_eq!(loaded.gender, Gender::Male);
    assert_eq!(loaded.birthday, NaiveDate::from_ymd_opt(1990, 5, 17));
    assert_eq!(loaded.version, 1);

    // Seeded admin predates bob
    let all: Vec<String> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.login)
        .collect();
    assert_eq!(all, vec!["Admin".to_string(), "bob".to_string()]);
}

#[tokio::test]
async fn test_unique_login_violation_is_duplicate() {
    let (_db, store) = setup().await;
    store.insert(bob()).await.unwrap();

    let err = store.insert(bob()).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateLogin(login) if login == "bob"));
}

#[tokio::test]
async fn test_update_checks_version() {
    let (_db, store) = setup().await;
    let mut account = store.insert(bob()).await.unwrap();
    let stale = account.clone();

    account.revoke("Admin", account.created_on + Duration::hours(1));
    let saved = store.update(account).await.unwrap();
    assert_eq!(saved.version, 2);

    let err = store.update(stale).await.unwrap_err();
    assert!(matches!(err, AppError::ConcurrencyConflict));

    let loaded = store.find_by_login("bob").await.unwrap().unwrap();
    assert_eq!(loaded.revoked_by(), Some("Admin"));
    assert!(store
        .list_active()
        .await
        .unwrap()
        .iter()
        .all(|a| a.login != "bob"));
}

#[tokio::test]
async fn test_rename_onto_existing_login_is_duplicate() {
    let (_db, store) = setup().await;
    let mut account = store.insert(bob()).await.unwrap();
    account.login = "Admin".to_string();

    let err = store.update(account).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateLogin(_)));
}

#[tokio::test]
async fn test_remove() {
    let (_db, store) = setup().await;
    let account = store.insert(bob()).await.unwrap();

    store.remove(account.id).await.unwrap();
    assert!(store.find_by_id(account.id).await.unwrap().is_none());

    let err = store.remove(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_schema_rejects_unknown_gender_code() {
    let (db, store) = setup().await;

    let mut row = ActiveModel::from(&bob());
    row.gender = Set(7);
    let result = AccountEntity::insert(row)
        .exec_without_returning(db.connection())
        .await;

    assert!(result.is_err());
    assert!(store.find_by_login("bob").await.unwrap().is_none());
}
