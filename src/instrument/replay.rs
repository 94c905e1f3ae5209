//! Replay of recorded calls.
//!
//! Rebuilds the trace of an operation from its counter and its two history
//! lists without writing anything back.

use std::fmt;

use serde::Serialize;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::instrument::{inputs_key, outputs_key};

/// One logged call: rendered arguments and rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayedCall {
    /// Argument tuple as logged, e.g. `('hello',)`
    pub input: String,
    /// Result as logged
    pub output: String,
}

/// Trace of an operation's recorded history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    /// Operation identity the trace belongs to
    pub operation: String,
    /// Counter value (number of invocations, failed ones included)
    pub count: u64,
    /// Input/output pairs in call order, up to the shorter log
    pub calls: Vec<ReplayedCall>,
}

/// Reads the counter and history logs of `identity` into a [`Replay`].
///
/// A missing counter reads as zero. Entries are paired by position and the
/// longer log is truncated to the shorter one.
pub async fn replay(backend: &dyn Backend, identity: &str) -> Result<Replay> {
    let count = match backend.get(identity).await? {
        Some(raw) => String::from_utf8_lossy(&raw).parse::<u64>().map_err(|_| {
            Error::Conversion(format!("call counter '{}' is not a number", identity))
        })?,
        None => 0,
    };

    let inputs = backend.lrange(&inputs_key(identity), 0, -1).await?;
    let outputs = backend.lrange(&outputs_key(identity), 0, -1).await?;

    let calls = inputs
        .iter()
        .zip(outputs.iter())
        .map(|(input, output)| ReplayedCall {
            input: String::from_utf8_lossy(input).into_owned(),
            output: String::from_utf8_lossy(output).into_owned(),
        })
        .collect();

    Ok(Replay {
        operation: identity.to_string(),
        count,
        calls,
    })
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.operation, self.count)?;
        for call in &self.calls {
            write!(f, "\n{}(*{}) -> {}", self.operation, call.input, call.output)?;
        }
        Ok(())
    }
}
