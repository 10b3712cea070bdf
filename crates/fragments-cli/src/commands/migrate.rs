//! Apply pending database migrations.

use fragments_core::config::AppConfig;
use fragments_core::error::AppError;
use fragments_database::migration::run_migrations;

use crate::output::{self, OutputFormat};

/// Execute the migrate command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let db = super::connect(config).await?;

    run_migrations(db.pool()).await?;
    db.close().await;

    output::print_success("All migrations applied", format);
    Ok(())
}
