//! Snapshot Task
//!
//! Background task that periodically drains the catalog to the snapshot file.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::persistence::SnapshotFile;
use crate::service::CatalogService;

/// Writes the current catalog to `snapshot`.
///
/// The product list is copied under the read lock; the file write runs on the
/// blocking pool.
pub async fn save_snapshot(service: &CatalogService, snapshot: &SnapshotFile) -> Result<usize> {
    let products = service.all_products().await;
    let count = products.len();
    let file = snapshot.clone();

    tokio::task::spawn_blocking(move || file.save(&products))
        .await
        .map_err(|e| CatalogError::Internal(format!("Snapshot task panicked: {}", e)))??;

    Ok(count)
}

/// Spawns a background task that saves a snapshot every `interval_secs`.
///
/// A failed write is logged and retried on the next tick.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_snapshot_task(
    service: Arc<CatalogService>,
    snapshot: SnapshotFile,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting snapshot task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            match save_snapshot(&service, &snapshot).await {
                Ok(count) => debug!(
                    "Snapshot: wrote {} products to {}",
                    count,
                    snapshot.path().display()
                ),
                Err(e) => warn!("Snapshot failed: {}", e),
            }
        }
    })
}
