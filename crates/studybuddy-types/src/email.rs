//! validated email address type
//!
//! registration rejects an email that another account already uses, compared
//! case-insensitively, so the type carries a lowercase form for lookups.

use std::fmt;
use std::str::FromStr;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

/// a validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(EmailAddress);

impl Email {
    /// parse and validate an email address
    pub fn new(s: &str) -> Result<Self, EmailError> {
        let addr = EmailAddress::from_str(s.trim()).map_err(|_| EmailError::Invalid)?;
        Ok(Self(addr))
    }

    /// the address as given
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// lowercase form used for duplicate detection
    pub fn lowercase(&self) -> String {
        self.0.as_str().to_lowercase()
    }

    /// consume the Email and return the inner string
    pub fn into_inner(self) -> String {
        self.0.to_string()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Email::new(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Email {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.as_str().serialize(serializer)
    }
}

/// error type for email validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    /// email format is invalid
    #[error("invalid email format")]
    Invalid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(Email::new("student@uni.edu").is_ok());
        assert!(Email::new("first.last+cs101@uni.edu").is_ok());
        assert!(Email::new("  padded@uni.edu ").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(Email::new("").is_err());
        assert!(Email::new("not-an-email").is_err());
        assert!(Email::new("@uni.edu").is_err());
        assert!(Email::new("student@").is_err());
    }

    #[test]
    fn test_lowercase_for_lookup() {
        let email = Email::new("Ada.Lovelace@Uni.EDU").unwrap();
        assert_eq!(email.as_str(), "Ada.Lovelace@Uni.EDU");
        assert_eq!(email.lowercase(), "ada.lovelace@uni.edu");
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let result: Result<Email, _> = serde_json::from_str("\"nope\"");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid email format"));
    }
}
