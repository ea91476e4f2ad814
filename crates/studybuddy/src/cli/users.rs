//! the `users` subcommand - manage accounts directly in the database

use clap::{Args, Subcommand};
use color_eyre::eyre::{Context, Result, bail};
use studybuddy_db::Database;
use studybuddy_types::{Email, Role, User, UserId, Username};

use super::DbArgs;

/// manage users
#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// create a new user
    Create(CreateUserArgs),

    /// list all users
    List(ListUsersArgs),

    /// delete a user
    Delete(DeleteUserArgs),

    /// change a user's role
    SetRole(SetRoleArgs),
}

/// create a new user
#[derive(Args, Debug)]
pub struct CreateUserArgs {
    #[command(flatten)]
    db: DbArgs,

    /// username
    username: String,

    /// role (student, faculty, superadmin)
    #[arg(long, default_value = "student")]
    role: Role,

    /// email address
    #[arg(long)]
    email: Option<String>,

    #[arg(long, default_value = "")]
    first_name: String,

    #[arg(long, default_value = "")]
    last_name: String,
}

/// list users
#[derive(Args, Debug)]
pub struct ListUsersArgs {
    #[command(flatten)]
    db: DbArgs,

    /// only list users with this role
    #[arg(long)]
    role: Option<Role>,

    /// output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: String,
}

/// delete a user
#[derive(Args, Debug)]
pub struct DeleteUserArgs {
    #[command(flatten)]
    db: DbArgs,

    /// user id to delete
    user_id: u64,
}

/// change a user's role
#[derive(Args, Debug)]
pub struct SetRoleArgs {
    #[command(flatten)]
    db: DbArgs,

    /// user id
    user_id: u64,

    /// new role (student, faculty, superadmin)
    role: Role,
}

impl UsersCommand {
    /// run the users command
    pub async fn run(self) -> Result<()> {
        match self {
            UsersCommand::Create(args) => create_user(args).await,
            UsersCommand::List(args) => list_users(args).await,
            UsersCommand::Delete(args) => delete_user(args).await,
            UsersCommand::SetRole(args) => set_role(args).await,
        }
    }
}

async fn create_user(args: CreateUserArgs) -> Result<()> {
    let username = Username::new(args.username.trim()).context("invalid username")?;
    let email = args
        .email
        .as_deref()
        .map(Email::new)
        .transpose()
        .context("invalid email")?;

    let db = args.db.connect().await?;

    if db
        .get_user_by_username(username.as_str())
        .await
        .context("failed to check for existing user")?
        .is_some()
    {
        bail!("user '{}' already exists", username.as_str());
    }
    if let Some(email) = &email
        && db
            .get_user_by_email(&email.lowercase())
            .await
            .context("failed to check for existing email")?
            .is_some()
    {
        bail!("email '{}' is already registered", email.as_str());
    }

    let mut user = User::with_role(UserId(0), username.into_inner(), args.role);
    user.email = email.map(Email::into_inner);
    user.first_name = args.first_name.trim().to_string();
    user.last_name = args.last_name.trim().to_string();

    let created = db
        .create_user(&user)
        .await
        .context("failed to create user")?;

    println!("Created user:");
    println!("  ID:       {}", created.id.0);
    println!("  Username: {}", created.username);
    println!("  Role:     {}", created.role);
    if let Some(email) = &created.email {
        println!("  Email:    {}", email);
    }

    Ok(())
}

async fn list_users(args: ListUsersArgs) -> Result<()> {
    let db = args.db.connect().await?;

    let users = match args.role {
        Some(role) => db.list_users_by_role(role).await,
        None => db.list_users().await,
    }
    .context("failed to list users")?;

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    // table output
    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<20} {:<12} {:<25} {:<30}",
        "ID", "USERNAME", "ROLE", "NAME", "EMAIL"
    );
    println!("{}", "-".repeat(95));

    for user in users {
        let name = user.full_name();
        println!(
            "{:<6} {:<20} {:<12} {:<25} {:<30}",
            user.id.0,
            user.username,
            user.role,
            if name.is_empty() { "-" } else { &name },
            user.email.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

async fn delete_user(args: DeleteUserArgs) -> Result<()> {
    let db = args.db.connect().await?;

    if db
        .get_user(UserId(args.user_id))
        .await
        .context("failed to query user")?
        .is_none()
    {
        bail!("user {} not found", args.user_id);
    }

    // uploads, bookmarks, keys and approvals go with the account
    db.delete_user(UserId(args.user_id))
        .await
        .context("failed to delete user")?;

    println!("Deleted user {}", args.user_id);

    Ok(())
}

async fn set_role(args: SetRoleArgs) -> Result<()> {
    let db = args.db.connect().await?;

    let Some(mut user) = db
        .get_user(UserId(args.user_id))
        .await
        .context("failed to query user")?
    else {
        bail!("user {} not found", args.user_id);
    };

    let old_role = user.role;
    user.role = args.role;
    db.update_user(&user)
        .await
        .context("failed to update user")?;

    println!(
        "Changed role of '{}' from {} to {}",
        user.username, old_role, args.role
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::Cli;
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_create_with_role() {
        let cli = Cli::try_parse_from([
            "studybuddy",
            "users",
            "create",
            "alice",
            "--role",
            "faculty",
            "--email",
            "alice@example.edu",
        ])
        .unwrap();
        let super::super::Command::Users(UsersCommand::Create(args)) = cli.command else {
            panic!("expected users create");
        };
        assert_eq!(args.username, "alice");
        assert_eq!(args.role, Role::Faculty);
        assert_eq!(args.email.as_deref(), Some("alice@example.edu"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = Cli::try_parse_from(["studybuddy", "users", "set-role", "3", "janitor"]);
        assert!(result.is_err());
    }
}
