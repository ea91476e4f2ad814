//! validated username type for user identification.
//!
//! usernames must:
//! - be 1-150 characters long
//! - contain only ascii letters, digits and `@ . + - _`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// maximum length for a username.
pub const MAX_USERNAME_LEN: usize = 150;

/// a validated username string.
///
/// # Example
/// ```
/// use studybuddy_types::Username;
///
/// let username: Username = "ada.lovelace".parse().unwrap();
/// assert_eq!(username.as_str(), "ada.lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// create a new username, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, UsernameError> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// get the username string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// consume the username and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    fn is_allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
    }

    fn validate(s: &str) -> Result<(), UsernameError> {
        if s.is_empty() {
            return Err(UsernameError::Empty);
        }

        let len = s.chars().count();
        if len > MAX_USERNAME_LEN {
            return Err(UsernameError::TooLong(len));
        }

        if !s.chars().all(Self::is_allowed) {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Username {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Username {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// serde: deserialize with validation
impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Username::new(s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Username {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// error type for username validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// username cannot be empty.
    Empty,
    /// username exceeds maximum length.
    TooLong(usize),
    /// username contains invalid characters.
    InvalidCharacters,
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsernameError::Empty => write!(f, "username cannot be empty"),
            UsernameError::TooLong(len) => {
                write!(
                    f,
                    "username too long ({} chars, max {})",
                    len, MAX_USERNAME_LEN
                )
            }
            UsernameError::InvalidCharacters => {
                write!(
                    f,
                    "username may contain only letters, digits and @/./+/-/_"
                )
            }
        }
    }
}

impl std::error::Error for UsernameError {}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn valid_username_accepted(name in "[A-Za-z0-9@.+_-]{1,150}") {
            let username = Username::new(&name).unwrap();
            prop_assert_eq!(username.as_str(), name.as_str());
        }

        #[test]
        fn arbitrary_string_never_panics(s in ".*") {
            let _ = Username::new(&s);
        }

        #[test]
        fn too_long_rejected(n in (MAX_USERNAME_LEN + 1)..=300usize) {
            let long = "a".repeat(n);
            prop_assert!(Username::new(&long).is_err());
        }

        #[test]
        fn whitespace_rejected(prefix in "[a-z]{0,5}", suffix in "[a-z]{0,5}") {
            let input = format!("{} {}", prefix, suffix);
            prop_assert_eq!(Username::new(&input).unwrap_err(), UsernameError::InvalidCharacters);
        }
    }
}
