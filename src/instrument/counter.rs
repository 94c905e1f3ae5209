//! Call counting stage.

use async_trait::async_trait;
use tracing::debug;

use crate::backend::SharedBackend;
use crate::error::Result;
use crate::instrument::Operation;

/// Increments the counter under the operation's identity, then runs it.
///
/// The increment happens before the call: a failed increment keeps the
/// operation from running, and a failing operation is still counted.
pub struct Counted<O> {
    inner: O,
    backend: SharedBackend,
}

impl<O: Operation> Counted<O> {
    /// Wraps `inner`, counting into `backend`.
    pub fn new(inner: O, backend: SharedBackend) -> Self {
        Self { inner, backend }
    }

    /// The wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O: Operation> Operation for Counted<O> {
    type Input = O::Input;
    type Output = O::Output;

    fn identity(&self) -> &str {
        self.inner.identity()
    }

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let calls = self.backend.incr(self.identity()).await?;
        debug!(operation = self.identity(), calls, "counted call");

        self.inner.call(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Backend, MemoryBackend};
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Doubles its argument; fails on negatives.
    struct Double {
        runs: AtomicUsize,
    }

    #[async_trait]
    impl Operation for Double {
        type Input = (i64,);
        type Output = i64;

        fn identity(&self) -> &str {
            "Double.call"
        }

        async fn call(&self, input: (i64,)) -> Result<i64> {
            let (n,) = input;
            self.runs.fetch_add(1, Ordering::SeqCst);
            if n < 0 {
                return Err(Error::InvalidRequest("negative".into()));
            }
            Ok(n * 2)
        }
    }

    fn double() -> Double {
        Double {
            runs: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_counts_each_call_and_passes_result_through() {
        let backend = Arc::new(MemoryBackend::new());
        let counted = Counted::new(double(), backend.clone());

        assert_eq!(counted.call((2,)).await.unwrap(), 4);
        assert_eq!(counted.call((5,)).await.unwrap(), 10);

        assert_eq!(backend.get("Double.call").await.unwrap(), Some(b"2".to_vec()));
        assert_eq!(counted.inner().runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_call_is_still_counted() {
        let backend = Arc::new(MemoryBackend::new());
        let counted = Counted::new(double(), backend.clone());

        assert!(counted.call((-1,)).await.is_err());
        assert_eq!(backend.get("Double.call").await.unwrap(), Some(b"1".to_vec()));
    }

    #[tokio::test]
    async fn test_failed_increment_skips_the_call() {
        let backend = Arc::new(MemoryBackend::new());
        // A list under the counter key makes INCR fail with WrongType
        backend.rpush("Double.call", b"x".to_vec()).await.unwrap();
        let counted = Counted::new(double(), backend.clone());

        let result = counted.call((3,)).await;

        assert!(matches!(result, Err(Error::WrongType(_))));
        assert_eq!(counted.inner().runs.load(Ordering::SeqCst), 0);
    }
}
