//! studybuddy - study resource sharing server

use clap::Parser;
use color_eyre::eyre::Result;
use studybuddy::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(cmd) => cmd.run().await,
        Command::Admin(cmd) => cmd.run().await,
        Command::Users(cmd) => cmd.run().await,
        Command::Apikeys(cmd) => cmd.run().await,
        Command::Departments(cmd) => cmd.run().await,
        Command::Subjects(cmd) => cmd.run().await,
    }
}
