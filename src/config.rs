//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which key-value backend the process talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process store, expired entries swept by a background task
    Memory,
    /// Remote Redis server
    Redis,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "redis" => Ok(BackendKind::Redis),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend implementation to connect to
    pub backend: BackendKind,
    /// Redis connection URL, used when `backend` is `Redis`
    pub redis_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds (memory backend only)
    pub cleanup_interval: u64,
    /// Lifetime of a cached page in seconds
    pub page_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `PAGE_TTL` - Cached page lifetime in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: parse_var("BACKEND").unwrap_or(defaults.backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            page_ttl: parse_var::<u64>("PAGE_TTL")
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.page_ttl),
        }
    }

    /// Cached page lifetime as a `Duration`.
    pub fn page_ttl(&self) -> Duration {
        Duration::from_secs(self.page_ttl)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            server_port: 3000,
            cleanup_interval: 1,
            page_ttl: 10,
        }
    }
}
