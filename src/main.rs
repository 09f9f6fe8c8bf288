//! Biztime - Company and Invoice API
//!
//! A REST API server for companies and the invoices billed to them.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Storage Seam**: `store::Store` trait, injected through `AppState`
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router over the PostgreSQL store
//! 5. Serve until Ctrl+C or SIGTERM

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod slug;
mod state;
mod store;

use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::{state::AppState, store::postgres::PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG, defaults to "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let state = AppState::new(Arc::new(PgStore::new(pool)));
    let app = routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Resolve once Ctrl+C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::warn!("Received SIGTERM, shutting down"),
    }
}
