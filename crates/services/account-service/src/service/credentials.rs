//! Credential verification against stored accounts.

use std::sync::Arc;

use common::{AppError, AppResult};
use domain::Account;

use crate::repository::AccountRepository;

/// Login and password supplied with a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Checks a login/password pair. Revocation state is not consulted here.
#[derive(Clone)]
pub struct CredentialVerifier {
    repo: Arc<dyn AccountRepository>,
}

impl CredentialVerifier {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    /// True when an account with exactly this login exists and its stored
    /// password equals the supplied one.
    pub async fn verify(&self, login: &str, password: &str) -> AppResult<bool> {
        Ok(self
            .repo
            .find_by_login(login)
            .await?
            .is_some_and(|account| account.password.matches(password)))
    }

    /// Resolve the acting account, or `InvalidCredentials`.
    pub async fn authenticate(&self, credentials: &Credentials) -> AppResult<Account> {
        match self.repo.find_by_login(&credentials.login).await? {
            Some(account) if account.password.matches(&credentials.password) => Ok(account),
            _ => {
                tracing::warn!(login = %credentials.login, "Credential verification failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryAccountStore;
    use chrono::Utc;

    fn verifier() -> CredentialVerifier {
        CredentialVerifier::new(Arc::new(InMemoryAccountStore::seeded(Utc::now())))
    }

    #[tokio::test]
    async fn test_verify_requires_exact_pair() {
        let verifier = verifier();

        assert!(verifier.verify("Admin", "Admin").await.unwrap());
        assert!(!verifier.verify("Admin", "admin").await.unwrap());
        assert!(!verifier.verify("admin", "Admin").await.unwrap());
        assert!(!verifier.verify("", "").await.unwrap());
    }

    #[tokio::test]
    async fn test_authenticate_returns_acting_account() {
        let verifier = verifier();

        let account = verifier
            .authenticate(&Credentials::new("Admin", "Admin"))
            .await
            .unwrap();
        assert!(account.is_admin());

        let err = verifier
            .authenticate(&Credentials::new("Admin", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }
}
