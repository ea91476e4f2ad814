//! the `admin` subcommand - one-off setup tasks

use clap::{Args, Subcommand};
use color_eyre::eyre::{Context, Result};
use studybuddy_workflow::Workflow;

use super::DbArgs;

/// administrative setup
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// create the first superadmin, or elevate an existing user
    Bootstrap(BootstrapArgs),
}

#[derive(Args, Debug)]
pub struct BootstrapArgs {
    #[command(flatten)]
    db: DbArgs,

    /// username of the superadmin
    #[arg(short, long)]
    username: String,

    /// email address for a newly created account
    #[arg(long)]
    email: Option<String>,

    /// also mint an api key for the superadmin
    #[arg(long, default_value_t = false)]
    with_key: bool,
}

impl AdminCommand {
    /// run the admin command
    pub async fn run(self) -> Result<()> {
        match self {
            AdminCommand::Bootstrap(args) => bootstrap(args).await,
        }
    }
}

async fn bootstrap(args: BootstrapArgs) -> Result<()> {
    let config = args.db.load_config()?;
    let workflow = Workflow::new(args.db.connect().await?);

    let user = workflow
        .ensure_superadmin(&args.username, args.email.as_deref())
        .await
        .context("failed to bootstrap superadmin")?;

    println!("Superadmin ready:");
    println!("  ID:       {}", user.id);
    println!("  Username: {}", user.username);

    if args.with_key {
        let (secret, key) = workflow
            .issue_api_key(user.id, "bootstrap", config.api_key_expiration_days)
            .await
            .context("failed to create API key")?;
        println!("  Key ID:   {}", key.id);
        println!("  Key:      {}", secret.as_str());
        println!();
        println!("IMPORTANT: Save this key now. It cannot be retrieved later.");
    }

    Ok(())
}
