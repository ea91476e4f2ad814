//! cli subcommands for studybuddy.
//!
//! - `studybuddy serve` - run the http server
//! - `studybuddy admin bootstrap` - create or elevate the first superadmin
//! - `studybuddy users create` - create a user
//! - `studybuddy apikeys create` - mint an api key
//! - `studybuddy departments create` / `subjects create` - manage the catalog

mod admin;
mod apikeys;
mod catalog;
pub mod serve;
mod users;

pub use admin::AdminCommand;
pub use apikeys::ApikeysCommand;
pub use catalog::{DepartmentsCommand, SubjectsCommand};
pub use serve::ServeCommand;
pub use users::UsersCommand;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail};
use studybuddy_db::StudybuddyDb;
use studybuddy_types::{Config, DatabaseConfig, Role, User, UserId};
use tracing::debug;

/// default config file search paths (in order of priority).
const CONFIG_SEARCH_PATHS: &[&str] = &[
    "/etc/studybuddy/config.toml",
    "~/.config/studybuddy/config.toml",
    "./config.toml",
];

/// studybuddy - study resource sharing server
#[derive(Parser, Debug)]
#[command(name = "studybuddy")]
#[command(about = "Study resource sharing server", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// run the http server
    Serve(ServeCommand),

    /// administrative setup
    #[command(subcommand)]
    Admin(AdminCommand),

    /// manage users
    #[command(subcommand)]
    Users(UsersCommand),

    /// manage api keys
    #[command(subcommand)]
    Apikeys(ApikeysCommand),

    /// manage departments
    #[command(subcommand)]
    Departments(DepartmentsCommand),

    /// manage subjects
    #[command(subcommand)]
    Subjects(SubjectsCommand),
}

/// database selection shared by the management commands.
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// path to config file (toml format)
    #[arg(short, long, env = "STUDYBUDDY_CONFIG")]
    pub config: Option<PathBuf>,

    /// database url (sqlite:// or postgres://)
    #[arg(long, env = "STUDYBUDDY_DATABASE_URL")]
    pub database_url: Option<String>,
}

impl DbArgs {
    /// resolve the configuration: defaults, then config file, then flags.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = load_config_file(self.config.as_ref())?.unwrap_or_default();
        if let Some(db_url) = &self.database_url {
            config.database = parse_database_url(db_url)?;
        }
        Ok(config)
    }

    /// open the database, running migrations.
    pub async fn connect(&self) -> Result<StudybuddyDb> {
        let config = self.load_config()?;
        StudybuddyDb::new(&config)
            .await
            .with_context(|| {
                format!(
                    "failed to open database: {}",
                    config.database.connection_string
                )
            })
    }
}

/// the identity management commands act as when going through the workflow.
///
/// anyone holding the database already has every permission.
pub(crate) fn operator() -> User {
    User::with_role(UserId(0), "operator".to_string(), Role::SuperAdmin)
}

/// find and load config file, returning none if no config file is found.
pub fn load_config_file(config_path: Option<&PathBuf>) -> Result<Option<Config>> {
    // if explicit path provided, it must exist
    if let Some(path) = config_path {
        return read_config(path).map(Some);
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = expand_tilde::expand_tilde(path_str)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| PathBuf::from(path_str));
        if path.exists() {
            debug!("Found config file at {:?}", path);
            return read_config(&path).map(Some);
        }
    }

    Ok(None)
}

fn read_config(path: &PathBuf) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("failed to parse config file: {:?}", path))
}

/// parse a database url into a [`DatabaseConfig`].
pub fn parse_database_url(db_url: &str) -> Result<DatabaseConfig> {
    let parsed =
        url::Url::parse(db_url).with_context(|| format!("invalid database URL: {}", db_url))?;

    match parsed.scheme() {
        "postgres" | "postgresql" => Ok(DatabaseConfig {
            db_type: "postgres".to_string(),
            connection_string: db_url.to_string(),
            ..DatabaseConfig::default()
        }),
        "sqlite" => Ok(DatabaseConfig {
            db_type: "sqlite".to_string(),
            connection_string: parsed.path().to_string(),
            ..DatabaseConfig::default()
        }),
        scheme => bail!(
            "unsupported database scheme '{}', expected 'sqlite' or 'postgres'",
            scheme
        ),
    }
}
