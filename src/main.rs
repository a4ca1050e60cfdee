//! Product Catalog - A product CRUD service with a read cache
//!
//! Serves the product REST API over in-memory or SQLite storage.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_catalog::api::create_router;
use product_catalog::{spawn_sweep_task, AppState, Config};

/// Main entry point for the product service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open storage and create the product cache
/// 4. Start background cache sweep task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Product Catalog service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, storage={}, cache_enabled={}, sweep_interval={}s",
        config.server_port,
        if config.database_url.is_some() { "sqlite" } else { "memory" },
        config.cache_enabled,
        config.cache_sweep_interval
    );

    let state = AppState::from_config(&config)
        .await
        .context("failed to initialize storage")?;
    info!("Storage and cache initialized");

    let sweep_handle = spawn_sweep_task(
        state.cache.clone(),
        Duration::from_secs(config.cache_sweep_interval),
    );
    info!("Background cache sweep task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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

    sweep_handle.abort();
    warn!("Cache sweep task aborted");
}
