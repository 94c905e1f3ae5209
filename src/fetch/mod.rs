//! Fetch Module
//!
//! URL page cache: every request bumps the URL's access counter, and pages
//! are served from a short-lived cache entry when one is present.
//!
//! # Keys
//! - `count:<url>` - access counter, never expires
//! - `url:<url>` - cached page content, expires after the page TTL

mod fetcher;
mod stats;

pub use fetcher::{Fetcher, HttpFetcher};
pub use stats::FetchStats;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::backend::SharedBackend;
use crate::error::{Error, Result};

/// Lifetime of a cached page unless configured otherwise.
pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(10);

/// Key of the access counter for `url`.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

/// Key of the cached content for `url`.
pub fn content_key(url: &str) -> String {
    format!("url:{}", url)
}

// == Page Cache ==
/// Counting, expiring cache in front of a [`Fetcher`].
///
/// Two concurrent misses on the same URL may both reach the fetcher; the
/// later write simply refreshes the entry.
pub struct PageCache {
    backend: SharedBackend,
    fetcher: Arc<dyn Fetcher>,
    ttl: Duration,
    stats: RwLock<FetchStats>,
}

impl PageCache {
    // == Constructor ==
    /// Creates a cache with the default 10 second page lifetime.
    pub fn new(backend: SharedBackend, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_ttl(backend, fetcher, DEFAULT_PAGE_TTL)
    }

    /// Creates a cache whose pages expire after `ttl`.
    pub fn with_ttl(backend: SharedBackend, fetcher: Arc<dyn Fetcher>, ttl: Duration) -> Self {
        Self {
            backend,
            fetcher,
            ttl,
            stats: RwLock::new(FetchStats::new()),
        }
    }

    // == Fetch ==
    /// Returns the content of `url`, from cache when fresh.
    ///
    /// The access counter is incremented first, on hits, misses and failed
    /// fetches alike. A failed fetch writes no cache entry.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let accesses = self.backend.incr(&count_key(url)).await?;
        let cache_key = content_key(url);

        if let Some(cached) = self.backend.get(&cache_key).await? {
            self.stats.write().await.record_hit();
            debug!(url, accesses, "page cache hit");
            return String::from_utf8(cached)
                .map_err(|e| Error::Conversion(format!("cached page is not UTF-8: {}", e)));
        }

        self.stats.write().await.record_miss();
        let content = match self.fetcher.fetch(url).await {
            Ok(content) => content,
            Err(err) => {
                self.stats.write().await.record_failure();
                warn!(url, accesses, error = %err, "page fetch failed");
                return Err(err);
            }
        };

        self.backend
            .set_ex(&cache_key, content.clone().into_bytes(), self.ttl)
            .await?;
        info!(url, accesses, bytes = content.len(), "page fetched and cached");

        Ok(content)
    }

    // == Access Count ==
    /// Number of times `url` has been requested (0 if never).
    pub async fn access_count(&self, url: &str) -> Result<u64> {
        match self.backend.get(&count_key(url)).await? {
            Some(raw) => String::from_utf8_lossy(&raw).parse().map_err(|_| {
                Error::Conversion(format!("access counter for '{}' is not a number", url))
            }),
            None => Ok(0),
        }
    }

    // == Stats ==
    /// Snapshot of local hit/miss counters.
    pub async fn stats(&self) -> FetchStats {
        self.stats.read().await.clone()
    }

    /// Configured page lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
