//! API Module
//!
//! HTTP handlers and routing for the record store and page cache.
//!
//! # Endpoints
//! - `PUT /store` - Store a scalar under a generated key
//! - `GET /get/:key` - Retrieve a stored value
//! - `GET /replay/:operation` - Recorded call history of an operation
//! - `GET /fetch?url=...` - Fetch a page through the page cache
//! - `GET /stats` - Page cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
