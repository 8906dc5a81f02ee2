use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use journal_api_rust::auth::TokenCodec;
use journal_api_rust::config::AppConfig;
use journal_api_rust::database::memory::MemoryStore;
use journal_api_rust::database::postgres::PgStore;
use journal_api_rust::database::Store;
use journal_api_rust::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SECRET, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("starting journal API in {:?} mode", config.environment);

    let store: Arc<dyn Store> = match &config.database.url {
        Some(url) => {
            let store = PgStore::connect(url, &config.database)
                .await
                .context("failed to connect to database")?;
            tracing::info!("connected to Postgres");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, falling back to the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let codec = TokenCodec::new(&config.security).context("token codec configuration")?;
    let state = AppState { store, codec: Arc::new(codec) };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("journal API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
