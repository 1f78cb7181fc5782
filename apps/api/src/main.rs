mod config;
mod db;
mod errors;
mod models;
mod remote_jobs;
mod routes;
mod similarity;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::db::create_pool;
use crate::remote_jobs::RemotiveClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Board API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the remote jobs client
    let remote_jobs = RemotiveClient::new(&config.remote_jobs_url, config.remote_jobs_timeout)?;
    info!(
        "Remote jobs client initialized ({}, timeout {:?}, malformed records: {:?})",
        config.remote_jobs_url, config.remote_jobs_timeout, config.malformed_policy
    );

    // Initialize the resource store
    let state = match (config.store_backend, config.database_url.as_deref()) {
        (StoreBackend::Postgres, Some(database_url)) => {
            let db = create_pool(database_url, config.database_max_connections).await?;
            AppState::postgres(db, Arc::new(remote_jobs), config.clone())
        }
        (StoreBackend::Postgres, None) => {
            anyhow::bail!("STORE_BACKEND=postgres requires DATABASE_URL")
        }
        (StoreBackend::Memory, _) => {
            info!("Using in-memory store; data is lost on restart");
            AppState::in_memory(Arc::new(remote_jobs), config.clone())
        }
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
