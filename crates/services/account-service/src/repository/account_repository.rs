//! Account repository implementation with soft delete and optimistic concurrency.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use super::entities::account::{self, ActiveModel, Entity as AccountEntity};
use common::{AppError, AppResult};
use domain::Account;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
///
/// Lookups see every stored account, revoked ones included. Only
/// `list_active` filters on revocation state.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by login (exact match)
    async fn find_by_login(&self, login: &str) -> AppResult<Option<Account>>;

    /// Find account by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// List accounts that are not revoked, oldest first
    async fn list_active(&self) -> AppResult<Vec<Account>>;

    /// List every account, oldest first
    async fn list_all(&self) -> AppResult<Vec<Account>>;

    /// Persist a new account. Fails with `DuplicateLogin` if the login is taken.
    async fn insert(&self, account: Account) -> AppResult<Account>;

    /// Persist changes to an existing account.
    ///
    /// Matches on both id and version; returns the account with its version
    /// bumped, or `ConcurrencyConflict` when no row matched.
    async fn update(&self, account: Account) -> AppResult<Account>;

    /// Permanently erase an account
    async fn remove(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AccountRepository over SeaORM
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique index violations on `login` surface as a duplicate login.
fn write_error(err: DbErr, login: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateLogin(login.to_string()),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_login(&self, login: &str) -> AppResult<Option<Account>> {
        let result = AccountEntity::find()
            .filter(account::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let result = AccountEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn list_active(&self) -> AppResult<Vec<Account>> {
        let models = AccountEntity::find()
            .filter(account::Column::RevokedOn.is_null())
            .order_by_asc(account::Column::CreatedOn)
            .order_by_asc(account::Column::Login)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Account::from).collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Account>> {
        let models = AccountEntity::find()
            .order_by_asc(account::Column::CreatedOn)
            .order_by_asc(account::Column::Login)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Account::from).collect())
    }

    async fn insert(&self, account: Account) -> AppResult<Account> {
        AccountEntity::insert(ActiveModel::from(&account))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| write_error(e, &account.login))?;

        Ok(account)
    }

    async fn update(&self, mut account: Account) -> AppResult<Account> {
        let next_version = account.version + 1;

        let mut active = ActiveModel::from(&account);
        active.id = NotSet;
        active.version = sea_orm::ActiveValue::Set(next_version);

        let result = AccountEntity::update_many()
            .set(active)
            .filter(account::Column::Id.eq(account.id))
            .filter(account::Column::Version.eq(account.version))
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, &account.login))?;

        if result.rows_affected == 0 {
            return Err(AppError::ConcurrencyConflict);
        }

        account.version = next_version;
        Ok(account)
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        let result = AccountEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
