//! In-memory account store for tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AccountRepository;
use common::{AppError, AppResult};
use domain::{Account, Password, SEED_ADMIN_LOGIN, SEED_ADMIN_NAME, SEED_ADMIN_PASSWORD};

/// Vec-backed store with the same uniqueness and version rules as
/// `AccountStore`.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding only the seeded administrator, stamped at `now`.
    pub fn seeded(now: chrono::DateTime<chrono::Utc>) -> Self {
        let admin = Account {
            id: Uuid::new_v4(),
            login: SEED_ADMIN_LOGIN.to_string(),
            password: Password::from_stored(SEED_ADMIN_PASSWORD.to_string()),
            name: SEED_ADMIN_NAME.to_string(),
            gender: Default::default(),
            birthday: None,
            is_admin: true,
            created_on: now,
            created_by: SEED_ADMIN_LOGIN.to_string(),
            modified_on: now,
            modified_by: SEED_ADMIN_LOGIN.to_string(),
            revocation: None,
            version: 1,
        };

        Self {
            accounts: RwLock::new(vec![admin]),
        }
    }

    /// Number of stored accounts, revoked ones included.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    fn sorted(mut accounts: Vec<Account>) -> Vec<Account> {
        accounts.sort_by(|a, b| {
            a.created_on
                .cmp(&b.created_on)
                .then_with(|| a.login.cmp(&b.login))
        });
        accounts
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountStore {
    async fn find_by_login(&self, login: &str) -> AppResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.login == login).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn list_active(&self) -> AppResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let active = accounts.iter().filter(|a| a.is_active()).cloned().collect();
        Ok(Self::sorted(active))
    }

    async fn list_all(&self) -> AppResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(Self::sorted(accounts.clone()))
    }

    async fn insert(&self, account: Account) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.login == account.login) {
            return Err(AppError::DuplicateLogin(account.login));
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn update(&self, mut account: Account) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .iter()
            .any(|a| a.id != account.id && a.login == account.login)
        {
            return Err(AppError::DuplicateLogin(account.login));
        }

        let stored = accounts
            .iter_mut()
            .find(|a| a.id == account.id && a.version == account.version)
            .ok_or(AppError::ConcurrencyConflict)?;

        account.version += 1;
        *stored = account.clone();
        Ok(account)
    }

    async fn remove(&self, id: Uuid) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|a| a.id != id);

        if accounts.len() == before {
            return Err(AppError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
