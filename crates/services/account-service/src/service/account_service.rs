//! Account service - credential checks, authorization and lifecycle.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use tracing::{info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{
    authorize, Account, AccountSummary, Clock, DeleteMode, NewAccount, Operation, ProfileChanges,
};

use super::credentials::{CredentialVerifier, Credentials};
use crate::repository::AccountRepository;

/// Account service trait for dependency injection.
///
/// Every operation except `list_all` authenticates the supplied credentials
/// before anything else happens.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Every stored account, revoked ones included. No credentials required.
    async fn list_all(&self) -> AppResult<Vec<Account>>;

    /// The acting account as a one-element list
    async fn read_own(&self, credentials: &Credentials) -> AppResult<Vec<Account>>;

    /// Accounts whose age this calendar year is strictly greater than `age`
    async fn read_older_than(&self, credentials: &Credentials, age: i32) -> AppResult<Vec<Account>>;

    /// Accounts that are not revoked, oldest first
    async fn list_active(&self, credentials: &Credentials) -> AppResult<Vec<Account>>;

    /// Field-limited view of one account, revoked or not
    async fn read_by_login(
        &self,
        credentials: &Credentials,
        login: &str,
    ) -> AppResult<AccountSummary>;

    async fn create(&self, credentials: &Credentials, draft: NewAccount) -> AppResult<Account>;

    /// Clear the revocation of an account. Succeeds on active accounts too.
    async fn restore(&self, credentials: &Credentials, login: &str) -> AppResult<Account>;

    async fn update_profile(
        &self,
        credentials: &Credentials,
        login: &str,
        changes: ProfileChanges,
    ) -> AppResult<Account>;

    async fn update_password(
        &self,
        credentials: &Credentials,
        login: &str,
        password: &str,
    ) -> AppResult<Account>;

    async fn update_login(
        &self,
        credentials: &Credentials,
        login: &str,
        new_login: &str,
    ) -> AppResult<Account>;

    /// Soft or hard delete, selected by the raw `mode` string
    async fn delete(&self, credentials: &Credentials, login: &str, mode: &str) -> AppResult<()>;
}

/// Concrete implementation of AccountService using repository.
pub struct AccountManager {
    repo: Arc<dyn AccountRepository>,
    verifier: CredentialVerifier,
    clock: Arc<dyn Clock>,
}

impl AccountManager {
    pub fn new(repo: Arc<dyn AccountRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            verifier: CredentialVerifier::new(repo.clone()),
            repo,
            clock,
        }
    }

    /// Authenticate, then apply the authorization policy for `operation`.
    async fn authorize(
        &self,
        credentials: &Credentials,
        target_login: &str,
        operation: Operation,
    ) -> AppResult<Account> {
        let acting = self.verifier.authenticate(credentials).await?;

        if let Err(err) = authorize(&acting, target_login, operation) {
            warn!(
                actor = %acting.login,
                target = %target_login,
                operation = %operation,
                error = %err,
                "Authorization denied"
            );
            return Err(err.into());
        }

        Ok(acting)
    }

    async fn find_target(&self, login: &str) -> AppResult<Account> {
        self.repo.find_by_login(login).await?.ok_or_not_found(login)
    }

    /// Write back a modified account. A lost version race is re-checked:
    /// if the row is gone the caller sees `NotFound`.
    async fn save(&self, account: Account, target_login: &str) -> AppResult<Account> {
        let id = account.id;
        match self.repo.update(account).await {
            Err(AppError::ConcurrencyConflict) => match self.repo.find_by_id(id).await? {
                None => Err(AppError::NotFound(target_login.to_string())),
                Some(_) => {
                    warn!(login = %target_login, "Concurrent modification detected");
                    Err(AppError::ConcurrencyConflict)
                }
            },
            other => other,
        }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn list_all(&self) -> AppResult<Vec<Account>> {
        self.repo.list_all().await
    }

    async fn read_own(&self, credentials: &Credentials) -> AppResult<Vec<Account>> {
        let acting = self
            .authorize(credentials, &credentials.login, Operation::ReadOwn)
            .await?;
        Ok(vec![acting])
    }

    async fn read_older_than(&self, credentials: &Credentials, age: i32) -> AppResult<Vec<Account>> {
        self.authorize(credentials, &credentials.login, Operation::ReadByAge)
            .await?;

        let year = self.clock.now().year();
        let accounts = self.repo.list_all().await?;

        Ok(accounts
            .into_iter()
            .filter(|a| a.age_in(year).is_some_and(|years| years > age))
            .collect())
    }

    async fn list_active(&self, credentials: &Credentials) -> AppResult<Vec<Account>> {
        self.authorize(credentials, &credentials.login, Operation::ListActive)
            .await?;
        self.repo.list_active().await
    }

    async fn read_by_login(
        &self,
        credentials: &Credentials,
        login: &str,
    ) -> AppResult<AccountSummary> {
        self.authorize(credentials, login, Operation::ReadByLogin)
            .await?;
        let account = self.find_target(login).await?;
        Ok(AccountSummary::from(&account))
    }

    async fn create(&self, credentials: &Credentials, draft: NewAccount) -> AppResult<Account> {
        let acting = self
            .authorize(credentials, &draft.login, Operation::Create)
            .await?;

        let account = Account::create(draft, &acting.login, self.clock.now())?;

        if self.repo.find_by_login(&account.login).await?.is_some() {
            return Err(AppError::DuplicateLogin(account.login));
        }

        let account = self.repo.insert(account).await?;
        info!(login = %account.login, actor = %acting.login, is_admin = account.is_admin, "Account created");
        Ok(account)
    }

    async fn restore(&self, credentials: &Credentials, login: &str) -> AppResult<Account> {
        let acting = self
            .authorize(credentials, login, Operation::Restore)
            .await?;

        let mut account = self.find_target(login).await?;
        account.restore(&acting.login, self.clock.now());

        let account = self.save(account, login).await?;
        info!(login = %login, actor = %acting.login, "Account restored");
        Ok(account)
    }

    async fn update_profile(
        &self,
        credentials: &Credentials,
        login: &str,
        changes: ProfileChanges,
    ) -> AppResult<Account> {
        let acting = self
            .authorize(credentials, login, Operation::UpdateProfile)
            .await?;

        let mut account = self.find_target(login).await?;
        account.update_profile(changes, &acting.login, self.clock.now())?;

        let account = self.save(account, login).await?;
        info!(login = %login, actor = %acting.login, "Profile updated");
        Ok(account)
    }

    async fn update_password(
        &self,
        credentials: &Credentials,
        login: &str,
        password: &str,
    ) -> AppResult<Account> {
        let acting = self
            .authorize(credentials, login, Operation::UpdatePassword)
            .await?;

        let mut account = self.find_target(login).await?;
        account.change_password(password, &acting.login, self.clock.now())?;

        let account = self.save(account, login).await?;
        info!(login = %login, actor = %acting.login, "Password updated");
        Ok(account)
    }

    async fn update_login(
        &self,
        credentials: &Credentials,
        login: &str,
        new_login: &str,
    ) -> AppResult<Account> {
        let acting = self
            .authorize(credentials, login, Operation::UpdateLogin)
            .await?;

        let mut account = self.find_target(login).await?;
        account.rename(new_login, &acting.login, self.clock.now())?;

        // Any existing holder counts, the target itself included
        if self.repo.find_by_login(new_login).await?.is_some() {
            return Err(AppError::DuplicateLogin(new_login.to_string()));
        }

        let account = self.save(account, login).await?;
        info!(login = %login, new_login = %new_login, actor = %acting.login, "Login changed");
        Ok(account)
    }

    async fn delete(&self, credentials: &Credentials, login: &str, mode: &str) -> AppResult<()> {
        let acting = self
            .authorize(credentials, login, Operation::Delete)
            .await?;

        let mode: DeleteMode = mode.parse()?;
        let mut account = self.find_target(login).await?;

        match mode {
            DeleteMode::Soft => {
                account.revoke(&acting.login, self.clock.now());
                self.save(account, login).await?;
            }
            DeleteMode::Hard => {
                self.repo.remove(account.id).await.map_err(|err| match err {
                    AppError::NotFound(_) => AppError::NotFound(login.to_string()),
                    other => other,
                })?;
            }
        }

        info!(login = %login, actor = %acting.login, mode = %mode, "Account deleted");
        Ok(())
    }
}
