//! Error types for the instrumentation layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Error Enum ==
/// Unified error type for backend access, conversions and page fetches.
#[derive(Error, Debug)]
pub enum Error {
    /// Backend primitive failed (connection lost, command rejected)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Key holds a value of the wrong kind for the operation
    #[error("Wrong type for key: {0}")]
    WrongType(String),

    /// Expiry is not usable by the backend
    #[error("Invalid expiry: {0}")]
    InvalidExpiry(String),

    /// Stored bytes could not be converted to the requested type
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Outbound page fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Key not found (only raised at the HTTP surface)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Backend(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::WrongType(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidExpiry(_) => StatusCode::BAD_REQUEST,
            Error::Conversion(_) => StatusCode::BAD_REQUEST,
            Error::Fetch(_) => StatusCode::BAD_GATEWAY,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;
