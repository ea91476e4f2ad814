//! configuration types for studybuddy

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// main configuration for studybuddy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// address to bind the http server to.
    pub listen_addr: String,

    /// database configuration.
    pub database: DatabaseConfig,

    /// where uploaded files live.
    pub media: MediaConfig,

    /// chat relay configuration.
    pub chat: ChatConfig,

    /// lifetime of newly issued api keys in days. 0 means keys never expire.
    pub api_key_expiration_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            database: DatabaseConfig::default(),
            media: MediaConfig::default(),
            chat: ChatConfig::default(),
            api_key_expiration_days: 90,
        }
    }
}

/// database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// database type: "sqlite" or "postgres".
    pub db_type: String,

    /// database connection string or file path.
    pub connection_string: String,

    /// sqlite-specific options.
    pub sqlite: SqliteConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: "sqlite".to_string(),
            connection_string: "/var/lib/studybuddy/db.sqlite".to_string(),
            sqlite: SqliteConfig::default(),
        }
    }
}

/// sqlite-specific options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// enable write-ahead logging.
    pub write_ahead_log: bool,
}

/// storage for uploaded resource files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// directory uploaded files are written under.
    pub root: PathBuf,

    /// largest accepted upload in bytes.
    pub max_upload_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/var/lib/studybuddy/media"),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

/// chat relay configuration.
///
/// the relay talks to any openai-compatible chat completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// whether the `/ws/chat` endpoint is served.
    pub enabled: bool,

    /// base url of the completion api, without the `/chat/completions` suffix.
    pub base_url: String,

    /// api key for the completion api.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// file to read the api key from. takes precedence over `api_key`.
    pub api_key_path: Option<PathBuf>,

    /// model name sent upstream.
    pub model: String,

    /// sampling temperature.
    pub temperature: f32,

    /// reply length limit in tokens.
    pub max_tokens: u32,

    /// system prompt sent before every user message.
    pub system_prompt: String,

    /// how long to wait for the upstream reply.
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            api_key_path: None,
            model: "openai/gpt-oss-120b".to_string(),
            temperature: 0.6,
            max_tokens: 300,
            system_prompt: "You are a helpful study assistant.".to_string(),
            timeout_secs: 30,
        }
    }
}
