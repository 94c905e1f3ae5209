//! Store Module
//!
//! The instrumented record store: values go in under fresh UUID keys, every
//! `store` call is counted and logged, and typed getters read them back.

mod scalar;


pub use scalar::Scalar;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::SharedBackend;
use crate::error::{Error, Result};
use crate::instrument::{instrument, replay, Counted, Operation, Recorded, Replay};

/// Identity under which `store` calls are counted and logged.
pub const STORE_OPERATION: &str = "store";

// == Store Operation ==
/// Writes one value under a freshly generated key.
struct StoreRecord {
    backend: SharedBackend,
}

#[async_trait]
impl Operation for StoreRecord {
    type Input = (Scalar,);
    type Output = String;

    fn identity(&self) -> &str {
        STORE_OPERATION
    }

    async fn call(&self, input: (Scalar,)) -> Result<String> {
        let (value,) = input;
        let key = Uuid::new_v4().to_string();
        self.backend.set(&key, value.into_bytes()).await?;
        debug!(key = %key, "stored record");
        Ok(key)
    }
}

// == Cache ==
/// Record store over a shared backend.
///
/// Holds the process-wide backend handle for its whole lifetime; dropping
/// the `Cache` does not close the connection.
pub struct Cache {
    backend: SharedBackend,
    store_op: Recorded<Counted<StoreRecord>>,
}

impl Cache {
    // == Constructor ==
    /// Creates the store and clears the backend's entire namespace.
    ///
    /// Every key, counter and log is wiped, including those of other
    /// components and other `Cache` instances on the same backend.
    pub async fn new(backend: SharedBackend) -> Result<Self> {
        backend.flushdb().await?;
        info!("Backend flushed for a new record store");

        let store_op = instrument(
            StoreRecord {
                backend: backend.clone(),
            },
            backend.clone(),
        );

        Ok(Self { backend, store_op })
    }

    // == Store ==
    /// Writes `value` unmodified under a new UUID key and returns the key.
    ///
    /// Side effects, in order: argument tuple appended to `store:inputs`,
    /// counter `store` incremented, value written, key appended to
    /// `store:outputs`.
    pub async fn store(&self, value: impl Into<Scalar>) -> Result<String> {
        let value = value.into();
        self.store_op.call((value,)).await
    }

    // == Get ==
    /// Raw bytes under `key`, or `None` if absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.backend.get(key).await
    }

    /// Value under `key` passed through `converter`, or `None` if absent.
    ///
    /// The converter only runs on a present value; its errors propagate.
    pub async fn get_with<T, F>(&self, key: &str, converter: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        self.get(key).await?.map(converter).transpose()
    }

    /// Value under `key` decoded as UTF-8.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode_utf8).await
    }

    /// Value under `key` parsed as a decimal integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, |raw| parse_text(raw, "integer")).await
    }

    /// Value under `key` parsed as a float.
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, |raw| parse_text(raw, "float")).await
    }

    // == Replay ==
    /// Trace of every recorded `store` call.
    pub async fn replay(&self) -> Result<Replay> {
        replay(self.backend.as_ref(), STORE_OPERATION).await
    }

    /// The backend handle this store writes to.
    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }
}

fn decode_utf8(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|e| Error::Conversion(format!("value is not UTF-8: {}", e)))
}

fn parse_text<T: std::str::FromStr>(raw: Vec<u8>, kind: &str) -> Result<T> {
    let text = decode_utf8(raw)?;
    text.trim()
        .parse()
        .map_err(|_| Error::Conversion(format!("'{}' is not a valid {}", text, kind)))
}
