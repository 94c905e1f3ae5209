//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::backend::SharedBackend;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::{HttpFetcher, PageCache};
use crate::instrument::replay;
use crate::models::{
    FetchQuery, FetchResponse, GetResponse, HealthResponse, ReplayResponse, StatsResponse,
    StoreRequest, StoreResponse,
};
use crate::store::Cache;

/// Application state shared across all handlers.
///
/// Both components hold the same backend handle.
#[derive(Clone)]
pub struct AppState {
    /// Instrumented record store
    pub cache: Arc<Cache>,
    /// URL page cache
    pub pages: Arc<PageCache>,
}

impl AppState {
    /// Creates a new AppState from already built components.
    pub fn new(cache: Cache, pages: PageCache) -> Self {
        Self {
            cache: Arc::new(cache),
            pages: Arc::new(pages),
        }
    }

    /// Builds both components over `backend` with an HTTP fetcher.
    ///
    /// Flushes the backend, since a new [`Cache`] always does.
    pub async fn from_config(backend: SharedBackend, config: &Config) -> Result<Self> {
        let cache = Cache::new(backend.clone()).await?;
        let pages = PageCache::with_ttl(backend, Arc::new(HttpFetcher::new()), config.page_ttl());
        info!("Page cache entries expire after {:?}", pages.ttl());
        Ok(Self::new(cache, pages))
    }

    fn backend(&self) -> &SharedBackend {
        self.cache.backend()
    }
}

/// Handler for PUT /store
///
/// Stores a scalar under a fresh key and returns the key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let key = state.cache.store(req.value).await?;

    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a stored value as UTF-8 text.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get_str(&key).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(Error::NotFound(key)),
    }
}

/// Handler for GET /replay/:operation
///
/// Returns the recorded call history of an operation.
pub async fn replay_handler(
    State(state): State<AppState>,
    Path(operation): Path<String>,
) -> Result<Json<ReplayResponse>> {
    let trace = replay(state.backend().as_ref(), &operation).await?;

    Ok(Json(trace.into()))
}

/// Handler for GET /fetch?url=...
///
/// Fetches a page through the page cache.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<FetchResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(Error::InvalidRequest(error_msg));
    }

    let content = state.pages.fetch(&query.url).await?;
    let access_count = state.pages.access_count(&query.url).await?;

    Ok(Json(FetchResponse {
        url: query.url,
        content,
        access_count,
    }))
}

/// Handler for GET /stats
///
/// Returns page cache statistics of this process.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.pages.stats().await.into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
