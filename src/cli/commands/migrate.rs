use anyhow::Context;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let database = &config::config().database;

    let pool = DatabaseManager::connect(database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::migrate(&pool).await?;

    output_success(output_format, "Migrations applied", None)
}
