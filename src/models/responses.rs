//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::fetch::FetchStats;
use crate::instrument::Replay;

/// Response body for the STORE operation (PUT /store)
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Freshly generated key the value was stored under
    pub key: String,
}

impl StoreResponse {
    /// Creates a new StoreResponse
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value, decoded as UTF-8
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One replayed call inside a [`ReplayResponse`]
#[derive(Debug, Clone, Serialize)]
pub struct ReplayCall {
    /// Logged argument tuple
    pub input: String,
    /// Logged result
    pub output: String,
}

/// Response body for the REPLAY operation (GET /replay/:operation)
#[derive(Debug, Clone, Serialize)]
pub struct ReplayResponse {
    /// Operation identity
    pub operation: String,
    /// Number of recorded invocations
    pub count: u64,
    /// Paired inputs and outputs in call order
    pub calls: Vec<ReplayCall>,
    /// Human-readable trace
    pub trace: String,
}

impl From<Replay> for ReplayResponse {
    fn from(replay: Replay) -> Self {
        let trace = replay.to_string();
        Self {
            operation: replay.operation,
            count: replay.count,
            calls: replay
                .calls
                .into_iter()
                .map(|call| ReplayCall {
                    input: call.input,
                    output: call.output,
                })
                .collect(),
            trace,
        }
    }
}

/// Response body for the FETCH operation (GET /fetch?url=...)
#[derive(Debug, Clone, Serialize)]
pub struct FetchResponse {
    /// The fetched URL
    pub url: String,
    /// Page content
    pub content: String,
    /// Accesses of this URL so far, this one included
    pub access_count: u64,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Page requests served from cache
    pub hits: u64,
    /// Page requests that went to the network
    pub misses: u64,
    /// Network fetches that failed
    pub fetch_failures: u64,
    /// Cache hit rate (hits / total requests)
    pub hit_rate: f64,
}

impl From<FetchStats> for StatsResponse {
    fn from(stats: FetchStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            fetch_failures: stats.fetch_failures,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Current timestamp (RFC 3339)
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy response with the current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
