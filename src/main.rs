//! Product Catalog - An in-memory product catalog service
//!
//! Stores product records behind category, brand and price indexes and
//! memoizes filtered searches in a bounded LRU query cache.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_catalog::api::{create_router, AppState};
use product_catalog::persistence::SnapshotFile;
use product_catalog::tasks::{save_snapshot, spawn_snapshot_task};
use product_catalog::Config;

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Seed the product store from the snapshot file
/// 4. Start the periodic snapshot task if configured
/// 5. Serve the HTTP API until SIGINT/SIGTERM
/// 6. Write a final snapshot
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_catalog=info,audit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Product Catalog Server");

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: cache_capacity={}, port={}, snapshot={}, snapshot_interval={}s",
        config.cache_capacity,
        config.server_port,
        config.snapshot_path.display(),
        config.snapshot_interval
    );

    let snapshot = SnapshotFile::new(config.snapshot_path.clone());
    let store = snapshot
        .load_store()
        .context("failed to seed product store from snapshot")?;

    let state = AppState::from_config(&config, store).context("failed to build catalog service")?;
    let catalog = state.catalog.clone();
    info!("Catalog service initialized");

    let snapshot_handle = (config.snapshot_interval > 0).then(|| {
        spawn_snapshot_task(catalog.clone(), snapshot.clone(), config.snapshot_interval)
    });

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = snapshot_handle {
        handle.abort();
        warn!("Snapshot task aborted");
    }

    match save_snapshot(&catalog, &snapshot).await {
        Ok(count) => info!(
            "Saved {} products to {}",
            count,
            snapshot.path().display()
        ),
        Err(e) => error!("Final snapshot failed: {}", e),
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
}
