use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::router;
use crate::state::AppState;

const DEFAULT_LOG_FILTER: &str = "jobly_api=debug,tower_http=info";

/// Install the global subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber may already be installed when embedded or under test
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Connect, bind and serve until the process is stopped.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    config.validate().map_err(anyhow::Error::msg)?;

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting Jobly API in {:?} mode", config.environment);

    let app = router::app(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Jobly API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
