//! Username Value Object
//!
//! The username is the public handle a user picks during onboarding.
//! Having one is what makes a profile "complete" and unlocks social
//! actions (posting, liking, messaging).
//!
//! ## Invariants
//! - Length: 3 to 30 characters
//! - Characters: letters, digits, and underscore only
//! - Unique across users (enforced at the storage layer)

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length for a username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 30;

/// Username validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("username must be between {USERNAME_MIN_LENGTH} and {USERNAME_MAX_LENGTH} characters")]
    InvalidLength,

    #[error("username can only contain letters, numbers, and underscores")]
    InvalidCharacters,
}

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn new(s: impl Into<String>) -> Result<Self, UsernameError> {
        let s = s.into();
        let trimmed = s.trim();

        if trimmed.len() < USERNAME_MIN_LENGTH || trimmed.len() > USERNAME_MAX_LENGTH {
            return Err(UsernameError::InvalidLength);
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_usernames() {
        assert!(Username::new("alice").is_ok());
        assert!(Username::new("alice_99").is_ok());
        assert!(Username::new("ABC").is_ok());
        assert!(Username::new("a".repeat(30)).is_ok());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let username = Username::new("  alice  ").unwrap();
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert_eq!(Username::new("ab"), Err(UsernameError::InvalidLength));
        assert_eq!(Username::new(""), Err(UsernameError::InvalidLength));
        assert_eq!(
            Username::new("a".repeat(31)),
            Err(UsernameError::InvalidLength)
        );
    }

    #[test]
    fn test_rejects_bad_characters() {
        assert_eq!(
            Username::new("alice smith"),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::new("alice-99"),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::new("alice@"),
            Err(UsernameError::InvalidCharacters)
        );
    }
}
