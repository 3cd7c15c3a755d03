//! Account domain entity and related types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainResult;
use crate::gender::Gender;
use crate::password::Password;
use crate::validation::{validate_gender, validate_login, validate_name};

/// Soft delete marker. Present only while the account is revoked, so the
/// timestamp and the acting login can never be set independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revocation {
    pub revoked_on: DateTime<Utc>,
    pub revoked_by: String,
}

/// Account domain entity
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub login: String,
    pub password: Password,
    pub name: String,
    pub gender: Gender,
    pub birthday: Option<NaiveDate>,
    pub is_admin: bool,
    pub created_on: DateTime<Utc>,
    pub created_by: String,
    pub modified_on: DateTime<Utc>,
    pub modified_by: String,
    /// Soft delete state (None = active, Some = revoked)
    pub revocation: Option<Revocation>,
    /// Optimistic concurrency token maintained by the store
    pub version: i32,
}

impl Account {
    /// Build a new active account, validating every supplied field.
    pub fn create(draft: NewAccount, actor: &str, now: DateTime<Utc>) -> DomainResult<Self> {
        validate_login(&draft.login)?;
        let password = Password::new(&draft.password)?;
        validate_name(&draft.name)?;
        let gender = match draft.gender {
            Some(code) => validate_gender(code)?,
            None => Gender::default(),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            login: draft.login,
            password,
            name: draft.name,
            gender,
            birthday: draft.birthday,
            is_admin: draft.is_admin,
            created_on: now,
            created_by: actor.to_string(),
            modified_on: now,
            modified_by: actor.to_string(),
            revocation: None,
            version: 1,
        })
    }

    /// Check if account has admin rights
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Check if account is soft deleted
    pub fn is_revoked(&self) -> bool {
        self.revocation.is_some()
    }

    /// Check if account is active (not revoked)
    pub fn is_active(&self) -> bool {
        self.revocation.is_none()
    }

    pub fn revoked_on(&self) -> Option<DateTime<Utc>> {
        self.revocation.as_ref().map(|r| r.revoked_on)
    }

    pub fn revoked_by(&self) -> Option<&str> {
        self.revocation.as_ref().map(|r| r.revoked_by.as_str())
    }

    /// Age in whole calendar years: `year - birth year`.
    pub fn age_in(&self, year: i32) -> Option<i32> {
        self.birthday.map(|b| year - b.year())
    }

    /// Change the login. Uniqueness is the caller's concern.
    pub fn rename(&mut self, login: &str, actor: &str, now: DateTime<Utc>) -> DomainResult<()> {
        validate_login(login)?;
        self.login = login.to_string();
        self.touch(actor, now);
        Ok(())
    }

    pub fn change_password(
        &mut self,
        password: &str,
        actor: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.password = Password::new(password)?;
        self.touch(actor, now);
        Ok(())
    }

    /// Apply name/gender/birthday changes. All supplied fields are validated
    /// before any of them is assigned.
    pub fn update_profile(
        &mut self,
        changes: ProfileChanges,
        actor: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if let Some(ref name) = changes.name {
            validate_name(name)?;
        }
        let gender = changes.gender.map(validate_gender).transpose()?;

        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(gender) = gender {
            self.gender = gender;
        }
        if let Some(birthday) = changes.birthday {
            self.birthday = birthday;
        }
        self.touch(actor, now);
        Ok(())
    }

    /// Soft delete the account
    pub fn revoke(&mut self, actor: &str, now: DateTime<Utc>) {
        self.revocation = Some(Revocation {
            revoked_on: now,
            revoked_by: actor.to_string(),
        });
        self.touch(actor, now);
    }

    /// Restore a soft-deleted account. No-op on the revocation of an active one.
    pub fn restore(&mut self, actor: &str, now: DateTime<Utc>) {
        self.revocation = None;
        self.touch(actor, now);
    }

    fn touch(&mut self, actor: &str, now: DateTime<Utc>) {
        self.modified_on = now;
        self.modified_by = actor.to_string();
    }
}

/// Account creation input
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub login: String,
    pub password: String,
    pub name: String,
    /// Gender code; unknown when absent
    pub gender: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub is_admin: bool,
}

/// Profile update input; absent fields stay unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub gender: Option<i32>,
    /// `Some(None)` clears the birthday
    pub birthday: Option<Option<NaiveDate>>,
}

/// Account response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Unique account identifier
    pub id: Uuid,
    pub login: String,
    pub name: String,
    /// 0 female, 1 male, 2 unknown
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub gender: Gender,
    pub birthday: Option<NaiveDate>,
    pub is_admin: bool,
    pub created_on: DateTime<Utc>,
    pub created_by: String,
    pub modified_on: DateTime<Utc>,
    pub modified_by: String,
    /// Soft delete timestamp (null while active)
    pub revoked_on: Option<DateTime<Utc>>,
    pub revoked_by: Option<String>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            login: account.login.clone(),
            name: account.name.clone(),
            gender: account.gender,
            birthday: account.birthday,
            is_admin: account.is_admin,
            created_on: account.created_on,
            created_by: account.created_by.clone(),
            modified_on: account.modified_on,
            modified_by: account.modified_by.clone(),
            revoked_on: account.revoked_on(),
            revoked_by: account.revoked_by().map(str::to_string),
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        AccountResponse::from(&account)
    }
}

/// Field-limited view returned by lookup-by-login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub gender: Gender,
    pub birthday: Option<NaiveDate>,
    pub revoked_on: Option<DateTime<Utc>>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            gender: account.gender,
            birthday: account.birthday,
            revoked_on: account.revoked_on(),
        }
    }
}
