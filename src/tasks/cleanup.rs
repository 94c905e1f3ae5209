//! Expiry Sweep Task
//!
//! Background task that periodically removes expired entries from the
//! in-memory backend. Reads already ignore expired entries; the sweep only
//! reclaims memory for keys nobody reads again (old cached pages).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::backend::MemoryStore;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs and taking the store's write lock for each sweep.
///
/// # Arguments
/// * `store` - shared store, as returned by `MemoryBackend::store`
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(
    store: Arc<RwLock<MemoryStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    spawn_sweep(store, Duration::from_secs(cleanup_interval_secs.max(1)))
}

fn spawn_sweep(store: Arc<RwLock<MemoryStore>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting expiry sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.write().await.cleanup_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let store = Arc::new(RwLock::new(MemoryStore::new()));
        store
            .write()
            .await
            .set_ex("url:http://x", b"page".to_vec(), Duration::from_millis(50))
            .unwrap();

        let handle = spawn_sweep(store.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(250)).await;

        // Checked via len, which does not expire lazily like get does
        assert!(store.read().await.is_empty(), "Expired entry should have been swept");

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_preserves_live_entries() {
        let store = Arc::new(RwLock::new(MemoryStore::new()));
        {
            let mut guard = store.write().await;
            guard.incr("count:http://x").unwrap();
            guard
                .set_ex("url:http://x", b"page".to_vec(), Duration::from_secs(3600))
                .unwrap();
        }

        let handle = spawn_sweep(store.clone(), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(store.read().await.len(), 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let store = Arc::new(RwLock::new(MemoryStore::new()));

        let handle = spawn_cleanup_task(store, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
