//! Authorization rules.
//!
//! Decides whether an already authenticated account may perform an
//! operation on a target login. Credential checks happen before this point.

use crate::account::Account;
use crate::constants::{DENY_ADMIN_REQUIRED, DENY_NOT_OWNER, DENY_REVOKED};
use crate::error::{DomainError, DomainResult};

/// Operations exposed by the account directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListAll,
    ReadOwn,
    ReadByAge,
    ListActive,
    ReadByLogin,
    Create,
    Restore,
    UpdateProfile,
    UpdatePassword,
    UpdateLogin,
    Delete,
}

/// Who may perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credentials required
    Public,
    /// Administrators only
    AdminOnly,
    /// The target account itself (while active) or any administrator
    SelfOrAdmin,
}

impl Operation {
    pub fn access(self) -> Access {
        match self {
            Operation::ListAll => Access::Public,
            Operation::ReadByAge
            | Operation::ListActive
            | Operation::ReadByLogin
            | Operation::Create
            | Operation::Restore
            | Operation::Delete => Access::AdminOnly,
            Operation::ReadOwn
            | Operation::UpdateProfile
            | Operation::UpdatePassword
            | Operation::UpdateLogin => Access::SelfOrAdmin,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ListAll => "list_all",
            Operation::ReadOwn => "read_own",
            Operation::ReadByAge => "read_by_age",
            Operation::ListActive => "list_active",
            Operation::ReadByLogin => "read_by_login",
            Operation::Create => "create",
            Operation::Restore => "restore",
            Operation::UpdateProfile => "update_profile",
            Operation::UpdatePassword => "update_password",
            Operation::UpdateLogin => "update_login",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether `acting` may perform `operation` on `target_login`.
///
/// Admin status overrides both the ownership and the revoked-target rule.
/// For a non-admin the target of a self-service operation is the acting
/// account itself, so its own revocation state is the one that counts.
pub fn authorize(acting: &Account, target_login: &str, operation: Operation) -> DomainResult<()> {
    match operation.access() {
        Access::Public => Ok(()),
        _ if acting.is_admin() => Ok(()),
        Access::AdminOnly => Err(DomainError::insufficient_rights(DENY_ADMIN_REQUIRED)),
        Access::SelfOrAdmin => {
            if acting.login != target_login {
                return Err(DomainError::insufficient_rights(DENY_NOT_OWNER));
            }
            if acting.is_revoked() {
                return Err(DomainError::insufficient_rights(DENY_REVOKED));
            }
            Ok(())
        }
    }
}
