//! Field validation rules.
//!
//! Each rule is a pure function that returns the value unchanged when it is
//! acceptable, so callers can validate exactly the fields they are about to
//! assign and nothing else.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DomainError, DomainResult};
use crate::gender::Gender;

static LATIN_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-zA-Z]+$").expect("latin alphanumeric pattern is valid")
});

static LATIN_OR_CYRILLIC_LETTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Zа-яА-ЯёЁ]+$").expect("latin/cyrillic letter pattern is valid")
});

/// Account fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Login,
    Password,
    Name,
    Gender,
    Birthday,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Login => "login",
            Field::Password => "password",
            Field::Name => "name",
            Field::Gender => "gender",
            Field::Birthday => "birthday",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login: latin letters and digits only, not empty.
pub fn validate_login(value: &str) -> DomainResult<&str> {
    if LATIN_ALPHANUMERIC.is_match(value) {
        Ok(value)
    } else {
        Err(DomainError::validation(
            Field::Login,
            "only latin letters and digits are allowed",
        ))
    }
}

/// Password: same character set as the login.
pub fn validate_password(value: &str) -> DomainResult<&str> {
    if LATIN_ALPHANUMERIC.is_match(value) {
        Ok(value)
    } else {
        Err(DomainError::validation(
            Field::Password,
            "only latin letters and digits are allowed",
        ))
    }
}

/// Name: latin or cyrillic letters only, not empty.
pub fn validate_name(value: &str) -> DomainResult<&str> {
    if LATIN_OR_CYRILLIC_LETTERS.is_match(value) {
        Ok(value)
    } else {
        Err(DomainError::validation(
            Field::Name,
            "only latin and cyrillic letters are allowed",
        ))
    }
}

/// Gender: one of the enumerated codes.
pub fn validate_gender(code: i32) -> DomainResult<Gender> {
    Gender::try_from(code)
}
