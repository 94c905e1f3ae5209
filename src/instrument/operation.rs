//! The unit that counting and history recording wrap around.

use async_trait::async_trait;

use crate::error::Result;
use crate::instrument::{CanonicalArgs, CanonicalText};

/// A named, awaitable operation.
///
/// Wrappers such as [`Counted`](super::Counted) and [`Recorded`](super::Recorded)
/// are operations themselves, so stages stack without touching the inner logic.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Positional arguments of one call.
    type Input: CanonicalArgs + Send + 'static;
    /// Value produced by a successful call.
    type Output: CanonicalText + Send + 'static;

    /// Stable name used to key the counter and history logs.
    fn identity(&self) -> &str;

    /// Runs the operation once.
    async fn call(&self, input: Self::Input) -> Result<Self::Output>;
}
