use jobly_api::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and SECRET_KEY
    let _ = dotenvy::dotenv();

    server::init_tracing();

    let config = config::config().clone();
    server::serve(config).await
}
