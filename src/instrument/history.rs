//! Call history stage.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::backend::SharedBackend;
use crate::error::Result;
use crate::instrument::{CanonicalArgs, CanonicalText, Operation};

/// Key of the list holding an operation's logged arguments.
pub fn inputs_key(identity: &str) -> String {
    format!("{}:inputs", identity)
}

/// Key of the list holding an operation's logged results.
pub fn outputs_key(identity: &str) -> String {
    format!("{}:outputs", identity)
}

/// Logs each call's arguments before running it and its result after.
///
/// A failed call keeps its input entry and gets no output entry, so the two
/// lists can drift apart by one per failure. Failures of inner stages count
/// too: when wrapping [`Counted`](crate::instrument::Counted), a rejected
/// increment leaves an input entry that was neither counted nor run. Overlapping calls may also
/// interleave their entries; appends are atomic but pairs are not.
pub struct Recorded<O> {
    inner: O,
    backend: SharedBackend,
}

impl<O: Operation> Recorded<O> {
    /// Wraps `inner`, logging into `backend`.
    pub fn new(inner: O, backend: SharedBackend) -> Self {
        Self { inner, backend }
    }

    /// The wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O: Operation> Operation for Recorded<O> {
    type Input = O::Input;
    type Output = O::Output;

    fn identity(&self) -> &str {
        self.inner.identity()
    }

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let identity = self.identity();

        let args = input.canonical_args();
        self.backend
            .rpush(&inputs_key(identity), args.into_bytes())
            .await?;

        match self.inner.call(input).await {
            Ok(output) => {
                let logged = self
                    .backend
                    .rpush(&outputs_key(identity), output.canonical_text().into_bytes())
                    .await?;
                debug!(operation = identity, logged, "recorded call");
                Ok(output)
            }
            Err(err) => {
                warn!(operation = identity, error = %err, "call failed, no output recorded");
                Err(err)
            }
        }
    }
}
