//! Password value object.
//!
//! Passwords are stored and compared as given; the value object keeps
//! them out of debug output and owns the validation rule.

use crate::error::DomainResult;
use crate::validation::validate_password;

/// Account password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    value: String,
}

// Don't expose the password in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a password from user input.
    ///
    /// # Errors
    /// Returns a validation error unless the input is non-empty latin
    /// letters and digits.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        validate_password(plain_text)?;
        Ok(Self {
            value: plain_text.to_string(),
        })
    }

    /// Wrap a value read back from storage.
    pub fn from_stored(value: String) -> Self {
        Self { value }
    }

    /// Get the stored string.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume and return the stored string.
    pub fn into_string(self) -> String {
        self.value
    }

    /// Exact comparison with a supplied password.
    pub fn matches(&self, supplied: &str) -> bool {
        self.value == supplied
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_matches_exactly() {
        let password = Password::new("pass1").unwrap();

        assert!(password.matches("pass1"));
        assert!(!password.matches("Pass1"));
        assert!(!password.matches("pass1 "));
        assert!(!password.matches(""));
    }

    #[test]
    fn test_password_rejects_invalid_characters() {
        assert!(Password::new("pass word").is_err());
        assert!(Password::new("пароль").is_err());
        assert!(Password::new("").is_err());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("secret1").unwrap();
        let debug = format!("{:?}", password);

        assert!(!debug.contains("secret1"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_from_stored_skips_validation() {
        let password = Password::from_stored("legacy value".to_string());
        assert_eq!(password.as_str(), "legacy value");
    }
}
