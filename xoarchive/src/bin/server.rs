//! xoarchive HTTP Server Binary
//!
//! Entry point of the APOD proxy. It loads the configuration, builds the
//! upstream client and the router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! NASA_API_KEY=... cargo run --bin xoarchive-server
//!
//! # With a TOML configuration file
//! XOARCHIVE_CONFIG=xoarchive.toml cargo run --bin xoarchive-server
//! ```
//!
//! # Environment Variables
//!
//! - `NASA_API_KEY`: Upstream API key (required unless set in the config file)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS allow-list
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5000)
//! - `XOARCHIVE_CONFIG`: Path to a TOML configuration file
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use xoarchive::config::ServerConfig;
use xoarchive::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting xoarchive HTTP Server");

    let config = ServerConfig::load()?;
    info!(
        upstream = %config.apod_url,
        origins = ?config.allowed_origins,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
