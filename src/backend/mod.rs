//! Backend Module
//!
//! The key-value contract every component is written against, plus the
//! in-process and Redis implementations of it.
//!
//! A [`SharedBackend`] is the single connection handle of the process: it is
//! created once at startup, cloned into each component that needs it and
//! never closed explicitly.

mod entry;
mod memory;
mod redis_backend;
mod store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use entry::{Entry, Value};
pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;
pub use store::MemoryStore;

/// Process-wide handle to the backend.
pub type SharedBackend = Arc<dyn Backend>;

// == Backend Contract ==
/// Primitives required from the key-value store.
///
/// Counter increments and list appends must be atomic with respect to
/// concurrent callers; nothing above this trait adds locking of its own.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `SET`: stores `value` under `key`, dropping any previous expiry.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// `GET`: returns the value, or `None` if the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// `SETEX`: stores `value` under `key`, evicted once `ttl` elapses.
    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// `INCR`: atomically adds one, creating the counter at zero first.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// `RPUSH`: appends to the list at `key` and returns its new length.
    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<usize>;

    /// `LRANGE`: inclusive range, negative indices count from the tail.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// `FLUSHDB`: removes every key in the namespace.
    async fn flushdb(&self) -> Result<()>;
}
