//! Redis-backed implementation of the key-value contract
//!
//! Each primitive maps onto the native Redis command of the same name, so
//! atomicity of `INCR`/`RPUSH` and expiry of `SETEX` keys are Redis's own.
//! The `ConnectionManager` reconnects on its own and is cheap to clone, which
//! makes one `RedisBackend` safe to share across all callers in the process.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, ErrorKind};
use tracing::info;

use crate::backend::Backend;
use crate::error::{Error, Result};

/// [`Backend`] implementation over a Redis server.
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
}

impl RedisBackend {
    /// Connects to the server at `url` (e.g. `redis://127.0.0.1:6379`).
    ///
    /// # Errors
    /// - [`Error::Backend`] if the URL is malformed or the server is unreachable
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        info!("Connected to Redis at {}", url);

        Ok(Self { manager })
    }
}

/// Classifies a failed command the way [`MemoryStore`](crate::backend::MemoryStore)
/// reports the same condition, leaving [`Error::Backend`] for transport and
/// server-side failures.
fn command_failed(command: &str, key: &str, err: redis::RedisError) -> Error {
    if err.code() == Some("WRONGTYPE") {
        return Error::WrongType(key.to_string());
    }
    if err.kind() == ErrorKind::TypeError {
        return Error::Conversion(format!("Redis {} on '{}': {}", command, key, err));
    }
    if err.kind() == ErrorKind::ResponseError
        && err.detail().is_some_and(|detail| detail.contains("not an integer"))
    {
        return Error::Conversion(format!("value at '{}' is not an integer", key));
    }
    Error::Backend(format!("Redis {} failed: {}", command, err))
}

#[async_trait]
impl Backend for RedisBackend {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.manager.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| command_failed("SET", key, e))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        conn.get(key).await.map_err(|e| command_failed("GET", key, e))
    }

    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        if ttl_ms == 0 {
            return Err(Error::InvalidExpiry(format!(
                "expiry for '{}' must be at least one millisecond",
                key
            )));
        }

        let mut conn = self.manager.clone();
        // PSETEX keeps sub-second TTLs intact
        conn.pset_ex::<_, _, ()>(key, value, ttl_ms)
            .await
            .map_err(|e| command_failed("PSETEX", key, e))
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.manager.clone();
        conn.incr(key, 1).await.map_err(|e| command_failed("INCR", key, e))
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        let mut conn = self.manager.clone();
        conn.rpush(key, value)
            .await
            .map_err(|e| command_failed("RPUSH", key, e))
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.manager.clone();
        conn.lrange(key, start, stop)
            .await
            .map_err(|e| command_failed("LRANGE", key, e))
    }

    async fn flushdb(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| command_failed("FLUSHDB", "*", e))
    }
}
