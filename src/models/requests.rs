//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::store::Scalar;

/// JSON scalar accepted by `PUT /store`.
///
/// Integers are tried before floats so `7` stays an integer and `7.0` a float.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// JSON integer
    Int(i64),
    /// JSON number with a fractional part or exponent
    Float(f64),
    /// JSON string
    Text(String),
}

impl From<ScalarValue> for Scalar {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Int(n) => Scalar::Int(n),
            ScalarValue::Float(x) => Scalar::Float(x),
            ScalarValue::Text(text) => Scalar::Text(text),
        }
    }
}

/// Request body for the STORE operation (PUT /store)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The value to store
    pub value: ScalarValue,
}

/// Query string for the FETCH operation (GET /fetch?url=...)
#[derive(Debug, Clone, Deserialize)]
pub struct FetchQuery {
    /// The page to fetch
    pub url: String,
}

impl FetchQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.is_empty() {
            return Some("URL cannot be empty".to_string());
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Some("URL must use http or https".to_string());
        }
        None
    }
}
