//! Redis Tally - HTTP front for the record store and page cache
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Connect the configured backend (one handle for the whole process)
//! 4. Start the expiry sweep when running on the in-memory backend
//! 5. Build the record store (flushes the backend) and page cache
//! 6. Start HTTP server on configured port
//! 7. Handle graceful shutdown on SIGINT/SIGTERM

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_tally::{
    create_router, spawn_cleanup_task, AppState, BackendKind, Config, MemoryBackend, RedisBackend,
    SharedBackend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_tally=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Redis Tally");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, port={}, page_ttl={}s, cleanup_interval={}s",
        config.backend, config.server_port, config.page_ttl, config.cleanup_interval
    );

    let (backend, sweep_handle): (SharedBackend, Option<JoinHandle<()>>) = match config.backend {
        BackendKind::Memory => {
            let memory = MemoryBackend::new();
            let handle = spawn_cleanup_task(memory.store(), config.cleanup_interval);
            info!("In-memory backend ready, expiry sweep started");
            let backend: SharedBackend = Arc::new(memory);
            (backend, Some(handle))
        }
        BackendKind::Redis => {
            let redis = RedisBackend::connect(&config.redis_url)
                .await
                .with_context(|| format!("connecting to {}", config.redis_url))?;
            let backend: SharedBackend = Arc::new(redis);
            (backend, None)
        }
    };

    let state = AppState::from_config(backend, &config)
        .await
        .context("initialising record store")?;
    info!("Record store and page cache initialized");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: Option<JoinHandle<()>>) {
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

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Expiry sweep task aborted");
    }
}
