//! Scalar values accepted by [`Cache::store`](super::Cache::store).

use crate::instrument::{float_text, quote_bytes, quote_text, CanonicalText};

/// A value written to the backend as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Signed integer, stored as decimal text
    Int(i64),
    /// Float, stored in its shortest round-tripping decimal form
    Float(f64),
}

impl Scalar {
    /// The exact bytes written under the record's key.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Scalar::Text(text) => text.as_bytes().to_vec(),
            Scalar::Bytes(bytes) => bytes.clone(),
            Scalar::Int(n) => n.to_string().into_bytes(),
            Scalar::Float(x) => float_text(*x).into_bytes(),
        }
    }

    /// Consumes the value into the bytes written under the record's key.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Scalar::Text(text) => text.into_bytes(),
            Scalar::Bytes(bytes) => bytes,
            other => other.to_bytes(),
        }
    }
}

impl CanonicalText for Scalar {
    fn canonical_repr(&self) -> String {
        match self {
            Scalar::Text(text) => quote_text(text),
            Scalar::Bytes(bytes) => quote_bytes(bytes),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(x) => float_text(*x),
        }
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Scalar::Bytes(value)
    }
}

impl From<&[u8]> for Scalar {
    fn from(value: &[u8]) -> Self {
        Scalar::Bytes(value.to_vec())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}
