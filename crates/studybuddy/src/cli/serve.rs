//! the `serve` subcommand - runs the http server.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Context, Result};
use secrecy::SecretString;
use studybuddy_db::StudybuddyDb;
use studybuddy_types::{ChatConfig, Config};
use tokio::net::TcpListener;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::FmtSubscriber;

use super::{load_config_file, parse_database_url};
use crate::ChatClient;

/// run the studybuddy server
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// path to config file (toml format)
    #[arg(short, long, env = "STUDYBUDDY_CONFIG")]
    config: Option<PathBuf>,

    /// database url (sqlite:// or postgres://)
    #[arg(long, env = "STUDYBUDDY_DATABASE_URL")]
    database_url: Option<String>,

    /// address to listen on
    #[arg(long, env = "STUDYBUDDY_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// directory for uploaded files
    #[arg(long, env = "STUDYBUDDY_MEDIA_ROOT")]
    media_root: Option<PathBuf>,

    /// largest accepted upload in bytes
    #[arg(long, env = "STUDYBUDDY_MAX_UPLOAD_BYTES")]
    max_upload_bytes: Option<usize>,

    /// api key for the chat provider
    #[arg(long, env = "STUDYBUDDY_CHAT_API_KEY", hide_env_values = true)]
    chat_api_key: Option<String>,

    /// base url of the openai-compatible chat api
    #[arg(long, env = "STUDYBUDDY_CHAT_BASE_URL")]
    chat_base_url: Option<String>,

    /// disable the chat relay
    #[arg(long, env = "STUDYBUDDY_CHAT_DISABLED")]
    chat_disabled: bool,

    /// log level
    #[arg(long, env = "STUDYBUDDY_LOG_LEVEL")]
    log_level: Option<String>,
}

impl ServeCommand {
    /// convert cli arguments into a config struct, merging with config file if present.
    ///
    /// priority order: defaults -> config file -> cli flags
    fn into_config(self) -> Result<Config> {
        let mut config = match load_config_file(self.config.as_ref())? {
            Some(file_config) => {
                info!("Loaded configuration from file");
                file_config
            }
            None => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        };

        if let Some(db_url) = self.database_url {
            config.database = parse_database_url(&db_url)?;
        }
        if let Some(listen_addr) = self.listen_addr {
            config.listen_addr = listen_addr;
        }
        if let Some(media_root) = self.media_root {
            config.media.root = media_root;
        }
        if let Some(max) = self.max_upload_bytes {
            config.media.max_upload_bytes = max;
        }
        if let Some(key) = self.chat_api_key {
            config.chat.api_key = Some(key);
        }
        if let Some(base_url) = self.chat_base_url {
            config.chat.base_url = base_url;
        }
        if self.chat_disabled {
            config.chat.enabled = false;
        }

        Ok(config)
    }

    /// run the serve command
    pub async fn run(self) -> Result<()> {
        let log_level = parse_log_level(self.log_level.as_deref());
        let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        info!("Starting studybuddy...");

        let config = self.into_config()?;
        info!("Database: {}", config.database.connection_string);
        info!("Listen address: {}", config.listen_addr);
        info!("Media root: {:?}", config.media.root);

        // ensure parent directory exists for sqlite databases
        if config.database.db_type == "sqlite" {
            let db_path = std::path::Path::new(&config.database.connection_string);
            if let Some(parent) = db_path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                info!("Creating database directory: {:?}", parent);
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory: {:?}", parent)
                })?;
            }
        }

        std::fs::create_dir_all(&config.media.root)
            .with_context(|| format!("failed to create media root: {:?}", config.media.root))?;

        let db = StudybuddyDb::new(&config)
            .await
            .context("failed to initialize database")?;
        info!("Database initialized successfully");

        let chat = build_chat_client(&config.chat)?;

        let addr: SocketAddr = config
            .listen_addr
            .parse()
            .context("invalid listen address")?;

        let app = crate::create_app(db, config, chat);

        info!("Starting HTTP server on {}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await.context("server error")?;

        Ok(())
    }
}

fn parse_log_level(level: Option<&str>) -> Level {
    match level.unwrap_or("info").to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// build the chat client, reading the api key from `api_key_path` if set.
///
/// a missing key disables chat rather than failing start-up.
fn build_chat_client(config: &ChatConfig) -> Result<Option<ChatClient>> {
    if !config.enabled {
        info!("Chat relay disabled");
        return Ok(None);
    }

    let mut api_key = config.api_key.clone();
    if let Some(ref path) = config.api_key_path {
        info!("Loading chat api key from {:?}", path);
        api_key = Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read chat api key from {:?}", path))?
                .trim()
                .to_string(),
        );
    }

    let Some(api_key) = api_key.filter(|k| !k.is_empty()) else {
        warn!("No chat api key configured, chat relay disabled");
        return Ok(None);
    };

    let client = ChatClient::new(config, SecretString::from(api_key))
        .context("failed to build chat client")?;
    info!(model = %config.model, "Chat relay enabled");
    Ok(Some(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn empty_command() -> ServeCommand {
        ServeCommand {
            config: None,
            database_url: None,
            listen_addr: None,
            media_root: None,
            max_upload_bytes: None,
            chat_api_key: None,
            chat_base_url: None,
            chat_disabled: false,
            log_level: None,
        }
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let toml_content = r#"
listen_addr = "0.0.0.0:443"
api_key_expiration_days = 30

[database]
db_type = "sqlite"
connection_string = "/var/lib/studybuddy/db.sqlite"

[media]
root = "/srv/media"

[chat]
model = "llama-3"
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();
        file.flush().unwrap();

        let cmd = ServeCommand {
            config: Some(file.path().to_path_buf()),
            database_url: Some("sqlite:///tmp/override.db".to_string()),
            listen_addr: Some("127.0.0.1:8080".to_string()),
            chat_disabled: true,
            ..empty_command()
        };

        let config = cmd.into_config().unwrap();

        // cli overrides should win
        assert_eq!(config.database.connection_string, "/tmp/override.db");
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert!(!config.chat.enabled);

        // config file values should be preserved when not overridden
        assert_eq!(config.media.root, PathBuf::from("/srv/media"));
        assert_eq!(config.chat.model, "llama-3");
        assert_eq!(config.api_key_expiration_days, 30);
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level(None), Level::INFO);
        assert_eq!(parse_log_level(Some("DEBUG")), Level::DEBUG);
        assert_eq!(parse_log_level(Some("nonsense")), Level::INFO);
    }

    #[test]
    fn test_chat_client_needs_a_key() {
        let config = ChatConfig::default();
        assert!(build_chat_client(&config).unwrap().is_none());

        let mut key_file = NamedTempFile::new().unwrap();
        key_file.write_all(b"gsk-from-file\n").unwrap();
        key_file.flush().unwrap();
        let config = ChatConfig {
            api_key_path: Some(key_file.path().to_path_buf()),
            ..ChatConfig::default()
        };
        assert!(build_chat_client(&config).unwrap().is_some());

        let config = ChatConfig {
            enabled: false,
            api_key: Some("gsk".to_string()),
            ..ChatConfig::default()
        };
        assert!(build_chat_client(&config).unwrap().is_none());
    }
}
