use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Invalid database name: {0}")]
    InvalidDatabaseName(String),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds connection pools from configuration and runs maintenance queries
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect eagerly, failing fast when the database is unreachable
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::build_connection_string(config)?;
        let pool = Self::pool_options(config).connect(&connection_string).await?;

        info!("Created database pool for: {}", Self::database_name(&connection_string));
        Ok(pool)
    }

    /// Build a pool that opens connections on first use
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::build_connection_string(config)?;
        Ok(Self::pool_options(config).connect_lazy(&connection_string)?)
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    /// Resolve the URL, swapping the database name when the profile overrides it
    pub fn build_connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        let Some(database_name) = config.name_override.as_deref() else {
            return Ok(config.url.clone());
        };

        if !Self::is_valid_db_name(database_name) {
            return Err(DatabaseError::InvalidDatabaseName(database_name.to_string()));
        }

        let mut url =
            url::Url::parse(&config.url).map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
        // Replace the path to the database name (ensure leading slash)
        url.set_path(&format!("/{}", database_name));
        Ok(url.into())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    fn database_name(connection_string: &str) -> String {
        url::Url::parse(connection_string)
            .map(|u| u.path().trim_start_matches('/').to_string())
            .unwrap_or_default()
    }

    /// Database names are identifiers: [a-zA-Z0-9_]+
    fn is_valid_db_name(name: &str) -> bool {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
