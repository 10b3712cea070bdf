//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use fragments_core::config::AppConfig;
use fragments_core::error::AppError;
use fragments_database::DatabasePool;

use crate::output::OutputFormat;

/// Fragments: personal code-snippet manager
#[derive(Debug, Parser)]
#[command(name = "fragments", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the per-environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Configuration environment (selects `<config_dir>/<env>.toml`)
    #[arg(short, long, env = "FRAGMENTS_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// User administration
    User(user::UserArgs),
}

impl Cli {
    /// Whether this invocation starts the server.
    pub fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve(_))
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config_dir, &self.env)?;

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config, self.format).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: connect to the configured database
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
