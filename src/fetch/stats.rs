//! Fetch Statistics Module
//!
//! Tracks page cache performance in this process: hits, misses and failed fetches.

use serde::Serialize;

// == Fetch Stats ==
/// Local page cache metrics (not stored in the backend).
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchStats {
    /// Requests answered from the cached page
    pub hits: u64,
    /// Requests that had to go to the network
    pub misses: u64,
    /// Misses whose fetch failed
    pub fetch_failures: u64,
}

impl FetchStats {
    // == Constructor ==
    /// Creates a new FetchStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Failure ==
    /// Increments the failed fetch counter.
    pub fn record_failure(&mut self) {
        self.fetch_failures += 1;
    }
}
