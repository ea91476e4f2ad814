//! the `apikeys` subcommand - manage api keys

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use color_eyre::eyre::{Context, Result, bail};
use studybuddy_db::Database;
use studybuddy_types::{ApiKey, UserId};
use studybuddy_workflow::Workflow;

use super::DbArgs;

/// manage api keys
#[derive(Subcommand, Debug)]
pub enum ApikeysCommand {
    /// create a new api key
    Create(CreateArgs),

    /// list a user's api keys
    List(ListArgs),

    /// delete an api key
    Delete(DeleteArgs),
}

/// create a new api key
#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    db: DbArgs,

    /// user id to create the key for
    #[arg(short, long)]
    user: u64,

    /// name/description for the key
    #[arg(short, long)]
    name: String,

    /// key expiration in days (defaults to the configured value, 0 = never)
    #[arg(long)]
    expiration_days: Option<u32>,
}

/// list api keys
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    db: DbArgs,

    /// user id whose keys to list
    #[arg(short, long)]
    user: u64,

    /// show expired keys
    #[arg(long, default_value_t = false)]
    show_expired: bool,

    /// output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: String,
}

/// delete an api key
#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    db: DbArgs,

    /// key id to delete
    key_id: u64,
}

impl ApikeysCommand {
    /// run the apikeys command
    pub async fn run(self) -> Result<()> {
        match self {
            ApikeysCommand::Create(args) => create_key(args).await,
            ApikeysCommand::List(args) => list_keys(args).await,
            ApikeysCommand::Delete(args) => delete_key(args).await,
        }
    }
}

async fn create_key(args: CreateArgs) -> Result<()> {
    let config = args.db.load_config()?;
    let workflow = Workflow::new(args.db.connect().await?);

    let expiration_days = args
        .expiration_days
        .unwrap_or(config.api_key_expiration_days);
    let (secret, key) = workflow
        .issue_api_key(UserId(args.user), &args.name, expiration_days)
        .await
        .context("failed to create API key")?;

    println!("Created API key:");
    println!("  ID:         {}", key.id);
    println!("  Key:        {}", secret.as_str());
    println!("  Name:       {}", key.name);
    println!("  User:       {}", key.user_id);
    println!("  Expires:    {}", format_time(key.expiration));
    println!();
    println!("IMPORTANT: Save this key now. It cannot be retrieved later.");

    Ok(())
}

async fn list_keys(args: ListArgs) -> Result<()> {
    let db = args.db.connect().await?;

    let keys: Vec<ApiKey> = db
        .list_api_keys(UserId(args.user))
        .await
        .context("failed to list API keys")?
        .into_iter()
        .filter(|k| args.show_expired || !k.is_expired())
        .collect();

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    // table output
    if keys.is_empty() {
        println!("No API keys found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<20} {:<20} {:<6} {:<20} LAST USED",
        "ID", "SELECTOR", "NAME", "USER", "EXPIRES"
    );
    println!("{}", "-".repeat(95));

    for key in keys {
        let name = if key.name.chars().count() > 18 {
            format!("{}...", key.name.chars().take(15).collect::<String>())
        } else {
            key.name.clone()
        };

        println!(
            "{:<6} {:<20} {:<20} {:<6} {:<20} {}",
            key.id,
            key.selector,
            name,
            key.user_id,
            format_time(key.expiration),
            format_time(key.last_used_at)
        );
    }

    Ok(())
}

async fn delete_key(args: DeleteArgs) -> Result<()> {
    let db = args.db.connect().await?;

    if db
        .get_api_key_by_id(args.key_id)
        .await
        .context("failed to query API key")?
        .is_none()
    {
        bail!("API key {} not found", args.key_id);
    }

    db.delete_api_key(args.key_id)
        .await
        .context("failed to delete API key")?;

    println!("Deleted API key {}", args.key_id);

    Ok(())
}

fn format_time(at: Option<DateTime<Utc>>) -> String {
    at.map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(None), "never");
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(format_time(Some(at)), "2025-03-01 09:30");
    }
}
