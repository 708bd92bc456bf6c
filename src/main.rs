//! Credit API - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. With `DATABASE_URL`: create the connection pool and run migrations,
//!    otherwise fall back to the in-memory store
//! 3. Build the HTTP router
//! 4. Start server on configured port

use std::sync::Arc;

use credit_api::{
    config::Config,
    db,
    store::{SharedStore, memory::MemoryStore, postgres::PgStore},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG, defaults to "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let store: SharedStore = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url, config.db_max_connections).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, data is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let app = credit_api::app(store);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
