//! Delete modes.

use std::str::FromStr;

use crate::constants::{DELETE_MODE_HARD, DELETE_MODE_SOFT};
use crate::error::DomainError;

/// How an account is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Mark as revoked, keep the record
    Soft,
    /// Erase the record
    Hard,
}

impl FromStr for DeleteMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DELETE_MODE_SOFT => Ok(DeleteMode::Soft),
            DELETE_MODE_HARD => Ok(DeleteMode::Hard),
            other => Err(DomainError::InvalidDeleteMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for DeleteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteMode::Soft => f.write_str(DELETE_MODE_SOFT),
            DeleteMode::Hard => f.write_str(DELETE_MODE_HARD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("soft".parse::<DeleteMode>().unwrap(), DeleteMode::Soft);
        assert_eq!("hard".parse::<DeleteMode>().unwrap(), DeleteMode::Hard);
    }

    #[test]
    fn test_parse_is_exact() {
        for bad in ["medium", "Soft", "HARD", "", " soft"] {
            assert_eq!(
                bad.parse::<DeleteMode>(),
                Err(DomainError::InvalidDeleteMode(bad.to_string()))
            );
        }
    }
}
