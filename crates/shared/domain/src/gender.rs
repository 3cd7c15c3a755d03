//! Gender enumeration with its stored integer codes.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::validation::Field;

/// Gender of an account holder: 0 female, 1 male, 2 unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unknown,
}

impl Gender {
    /// Integer code as stored and transmitted
    pub fn code(self) -> i32 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
            Gender::Unknown => 2,
        }
    }

    /// Lenient conversion for values read back from storage
    pub fn from_stored(code: i32) -> Self {
        Gender::try_from(code).unwrap_or_default()
    }
}

impl TryFrom<i32> for Gender {
    type Error = DomainError;

    fn try_from(code: i32) -> DomainResult<Self> {
        match code {
            0 => Ok(Gender::Female),
            1 => Ok(Gender::Male),
            2 => Ok(Gender::Unknown),
            _ => Err(DomainError::validation(
                Field::Gender,
                "must be 0 (female), 1 (male) or 2 (unknown)",
            )),
        }
    }
}

impl From<Gender> for i32 {
    fn from(gender: Gender) -> Self {
        gender.code()
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
            Gender::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(Gender::default(), Gender::Unknown);
    }

    #[test]
    fn test_serde_uses_integer_codes() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "1");
        let parsed: Gender = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, Gender::Female);
        assert!(serde_json::from_str::<Gender>("7").is_err());
    }

    #[test]
    fn test_from_stored_falls_back_to_unknown() {
        assert_eq!(Gender::from_stored(1), Gender::Male);
        assert_eq!(Gender::from_stored(42), Gender::Unknown);
    }
}
