//! api key token in split-token form.
//!
//! tokens look like `sbk_{selector}_{verifier}`:
//! - the selector (16 hex chars) is stored in plain text and used for lookup
//! - the verifier (64 hex chars) is only stored as a sha-256 hash

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// the prefix for all api key tokens.
pub const API_KEY_PREFIX: &str = "sbk_";

const SELECTOR_HEX_LEN: usize = 16;
const VERIFIER_HEX_LEN: usize = 64;

/// a full api key token, as handed to the client once.
///
/// # Example
/// ```
/// use studybuddy_types::ApiKeySecret;
///
/// let secret = ApiKeySecret::generate();
/// let parsed: ApiKeySecret = secret.as_str().parse().unwrap();
/// assert_eq!(parsed.selector(), secret.selector());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeySecret(String);

impl ApiKeySecret {
    /// parse a token, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, ApiKeySecretError> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// generate a new random token.
    pub fn generate() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let selector: [u8; SELECTOR_HEX_LEN / 2] = rng.random();
        let verifier: [u8; VERIFIER_HEX_LEN / 2] = rng.random();
        Self(format!(
            "{}{}_{}",
            API_KEY_PREFIX,
            hex::encode(selector),
            hex::encode(verifier)
        ))
    }

    /// the full token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// the lookup selector.
    pub fn selector(&self) -> &str {
        let start = API_KEY_PREFIX.len();
        &self.0[start..start + SELECTOR_HEX_LEN]
    }

    /// the secret verifier part.
    pub fn verifier(&self) -> &str {
        &self.0[API_KEY_PREFIX.len() + SELECTOR_HEX_LEN + 1..]
    }

    /// hex-encoded sha-256 of the verifier, suitable for storage.
    pub fn verifier_hash(&self) -> String {
        hex::encode(Self::hash(self.verifier()))
    }

    /// check the verifier against a stored hex hash in constant time.
    pub fn verify_hash(&self, stored_hex: &str) -> bool {
        let Ok(stored) = hex::decode(stored_hex) else {
            return false;
        };
        Self::hash(self.verifier()).ct_eq(stored.as_slice()).into()
    }

    fn hash(verifier: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(verifier.as_bytes());
        hasher.finalize().into()
    }

    fn validate(s: &str) -> Result<(), ApiKeySecretError> {
        let rest = s
            .strip_prefix(API_KEY_PREFIX)
            .ok_or(ApiKeySecretError::MissingPrefix)?;
        let (selector, verifier) = rest
            .split_once('_')
            .ok_or(ApiKeySecretError::MissingSeparator)?;

        if selector.len() != SELECTOR_HEX_LEN || verifier.len() != VERIFIER_HEX_LEN {
            return Err(ApiKeySecretError::InvalidLength);
        }

        if !selector
            .chars()
            .chain(verifier.chars())
            .all(|c| c.is_ascii_hexdigit())
        {
            return Err(ApiKeySecretError::InvalidHex);
        }

        Ok(())
    }
}

// never print the verifier
impl fmt::Debug for ApiKeySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKeySecret({}{}_…)", API_KEY_PREFIX, self.selector())
    }
}

impl FromStr for ApiKeySecret {
    type Err = ApiKeySecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// error type for malformed api key tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiKeySecretError {
    /// token does not start with `sbk_`.
    #[error("api key must start with '{API_KEY_PREFIX}'")]
    MissingPrefix,

    /// no `_` between selector and verifier.
    #[error("api key is missing the selector separator")]
    MissingSeparator,

    /// selector or verifier has the wrong length.
    #[error("api key has an invalid length")]
    InvalidLength,

    /// non-hex characters.
    #[error("api key contains invalid characters")]
    InvalidHex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_valid() {
        let secret = ApiKeySecret::generate();
        assert!(secret.as_str().starts_with(API_KEY_PREFIX));
        assert_eq!(secret.selector().len(), SELECTOR_HEX_LEN);
        assert_eq!(secret.verifier().len(), VERIFIER_HEX_LEN);
        assert!(ApiKeySecret::new(secret.as_str()).is_ok());
    }

    #[test]
    fn test_generated_tokens_differ() {
        let a = ApiKeySecret::generate();
        let b = ApiKeySecret::generate();
        assert_ne!(a, b);
        assert_ne!(a.selector(), b.selector());
    }

    #[test]
    fn test_verify_hash() {
        let secret = ApiKeySecret::generate();
        let stored = secret.verifier_hash();
        assert!(secret.verify_hash(&stored));

        let other = ApiKeySecret::generate();
        assert!(!other.verify_hash(&stored));
        assert!(!secret.verify_hash("not-hex"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(
            ApiKeySecret::new("rsapi_abc_def").unwrap_err(),
            ApiKeySecretError::MissingPrefix
        );
        assert_eq!(
            ApiKeySecret::new("sbk_0123456789abcdef").unwrap_err(),
            ApiKeySecretError::MissingSeparator
        );
        assert_eq!(
            ApiKeySecret::new("sbk_0123_4567").unwrap_err(),
            ApiKeySecretError::InvalidLength
        );
        let bad_hex = format!("sbk_{}_{}", "z".repeat(16), "0".repeat(64));
        assert_eq!(
            ApiKeySecret::new(bad_hex).unwrap_err(),
            ApiKeySecretError::InvalidHex
        );
    }

    #[test]
    fn test_debug_hides_verifier() {
        let secret = ApiKeySecret::generate();
        let debug = format!("{:?}", secret);
        assert!(debug.contains(secret.selector()));
        assert!(!debug.contains(secret.verifier()));
    }
}
