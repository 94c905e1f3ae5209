//! In-process backend
//!
//! Wraps a [`MemoryStore`] in `Arc<RwLock<>>` so one store can be shared by
//! every component and by the expiry sweep task. Each primitive takes the
//! write lock once, which makes `INCR` and `RPUSH` atomic per call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::{Backend, MemoryStore};
use crate::error::Result;

/// [`Backend`] implementation living entirely in this process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryBackend {
    /// Creates a backend over a fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the underlying store, used by the sweep task.
    pub fn store(&self) -> Arc<RwLock<MemoryStore>> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.store.write().await.set(key, value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: reads may drop an expired entry
        self.store.write().await.get(key)
    }

    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.store.write().await.set_ex(key, value, ttl)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.store.write().await.incr(key)
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        self.store.write().await.rpush(key, value)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        self.store.write().await.lrange(key, start, stop)
    }

    async fn flushdb(&self) -> Result<()> {
        self.store.write().await.flush();
        Ok(())
    }
}
