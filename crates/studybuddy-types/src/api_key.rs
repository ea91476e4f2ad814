//! api key type for authenticating api requests
//!
//! every request to the rest api carries an api key as a bearer token.
//! keys are issued on registration, when a superadmin creates a faculty
//! account, or from the cli.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api_key_secret::ApiKeySecret;
use crate::user::UserId;

/// a stored api key. the token itself is never stored, only its selector
/// and a hash of the verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// unique identifier
    pub id: u64,

    /// lookup selector (public part of the token)
    pub selector: String,

    /// hex sha-256 of the verifier
    #[serde(skip_serializing)]
    pub verifier_hash: String,

    /// human-readable name for this key
    pub name: String,

    /// user who owns this key
    pub user_id: UserId,

    /// when this key expires (None = never)
    pub expiration: Option<DateTime<Utc>>,

    /// when this key was created
    pub created_at: DateTime<Utc>,

    /// when this key was last used
    pub last_used_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// build the stored form of a freshly generated secret
    pub fn from_secret(secret: &ApiKeySecret, name: String, user_id: UserId) -> Self {
        Self {
            id: 0,
            selector: secret.selector().to_string(),
            verifier_hash: secret.verifier_hash(),
            name,
            user_id,
            expiration: None,
            created_at: Utc::now(),
            last_used_at: None,
        }
    }

    /// set expiration a number of days from now. zero means never.
    pub fn expires_in_days(mut self, days: u32) -> Self {
        self.expiration = (days > 0).then(|| Utc::now() + Duration::days(i64::from(days)));
        self
    }

    /// check a presented token against this key
    pub fn verify(&self, secret: &ApiKeySecret) -> bool {
        secret.selector() == self.selector && secret.verify_hash(&self.verifier_hash)
    }

    /// check if this key is expired
    pub fn is_expired(&self) -> bool {
        match &self.expiration {
            None => false,
            Some(exp) => Utc::now() > *exp,
        }
    }
}
