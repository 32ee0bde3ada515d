//! Rate Hub - an in-memory CRUD backend for banks, currencies and
//! exchange rates with bounded response caching.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod registry;
mod tasks;
mod visits;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_stats_reporter;

/// Main entry point for the rate hub server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create registries, cache partitions and the invalidation coordinator
/// 4. Start the background cache stats reporter
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rate_hub=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rate Hub Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_max_weight={}, banks_cache={}, currencies_cache={}, rates_cache={}, port={}, stats_interval={}s",
        config.cache_max_weight,
        config.cache_banks_enabled,
        config.cache_currencies_enabled,
        config.cache_rates_enabled,
        config.server_port,
        config.stats_interval
    );

    // Create application state: registries, partitions, coordinator
    let state = AppState::from_config(&config);
    info!("Registries and cache partitions initialized");

    // Start background stats reporter
    let reporter_handle = spawn_stats_reporter(
        state.bank_cache.clone(),
        state.currency_cache.clone(),
        state.rate_cache.clone(),
        state.rate_value_cache.clone(),
        config.stats_interval,
    );
    info!("Cache stats reporter started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reporter_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the stats reporter and allows graceful
/// shutdown.
async fn shutdown_signal(reporter_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the stats reporter
    reporter_handle.abort();
    warn!("Stats reporter aborted");
}
