//! User administration commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use fragments_auth::password::{PasswordHasher, PasswordValidator};
use fragments_core::config::AppConfig;
use fragments_core::error::AppError;
use fragments_database::repositories::UserRepository;
use fragments_entity::user::User;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Set a new password for a user (prompts for it)
    ResetPassword {
        /// Username
        username: String,
    },
    /// Delete a user and everything they own
    Delete {
        /// Username
        username: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::connect(config).await?;
    let user_repo = UserRepository::new(db.pool().clone());

    match &args.command {
        UserCommand::List => {
            let users = user_repo.find_all().await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format, "No users found.");
        }
        UserCommand::ResetPassword { username } => {
            let user = find_user(&user_repo, username).await?;
            let validator = PasswordValidator::new(&config.auth);

            let password = dialoguer::Password::new()
                .with_prompt(format!("New password for '{}'", user.username))
                .with_confirmation("Confirm password", "Passwords do not match")
                .validate_with(|input: &String| {
                    validator.validate(input).map_err(|e| e.message)
                })
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

            validator.validate(&password)?;
            let hash = PasswordHasher::new().hash_password(&password)?;
            user_repo.update_password(user.id, &hash).await?;

            output::print_success(
                &format!("Password reset for '{}'", user.username),
                format,
            );
        }
        UserCommand::Delete { username, yes } => {
            let user = find_user(&user_repo, username).await?;

            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete '{}' and all their folders, snippets and tags?",
                        user.username
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            user_repo.delete(user.id).await?;
            output::print_success(&format!("User '{}' deleted", user.username), format);
        }
    }

    db.close().await;
    Ok(())
}

async fn find_user(repo: &UserRepository, username: &str) -> Result<User, AppError> {
    repo.find_by_username(username.trim())
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
}
