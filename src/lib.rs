//! Redis Tally - call counting, call history and page caching over a key-value backend
//!
//! Cross-cutting behaviour (counting, history, replay, TTL caching) is composed
//! around plain operations, all sharing one Redis-style namespace.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod fetch;
pub mod instrument;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use backend::{Backend, MemoryBackend, RedisBackend, SharedBackend};
pub use config::{BackendKind, Config};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher, PageCache};
pub use instrument::{instrument, replay, Counted, Operation, Recorded, Replay};
pub use store::{Cache, Scalar};
pub use tasks::spawn_cleanup_task;
