//! Cache Sweep Task
//!
//! Background task that clears the whole product cache on a fixed period,
//! independent of write activity.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ProductCache;

/// Spawns a background task that empties both cache namespaces every
/// `interval`.
///
/// The first sweep happens one full interval after spawning. Each sweep
/// holds a namespace lock only while clearing it.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(ProductCache::new(true));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(600));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(cache: Arc<ProductCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep().await;
            if removed > 0 {
                info!("Cache sweep: removed {} entries", removed);
            } else {
                debug!("Cache cleared.");
            }
        }
    })
}
