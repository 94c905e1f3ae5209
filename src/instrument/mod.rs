//! Instrument Module
//!
//! Cross-cutting stages composed around an [`Operation`] without touching
//! its logic, and the replay that reads their records back.
//!
//! # Composition
//! [`instrument`] builds `Recorded(Counted(op))`, so one call performs, in
//! order:
//! 1. append the argument tuple to `<identity>:inputs`
//! 2. increment the counter `<identity>`
//! 3. run the operation
//! 4. append the result to `<identity>:outputs` (successful calls only)
//!
//! A failure at step 2 or 3 stops the call there; the input from step 1 stays.

mod canonical;
mod counter;
mod history;
mod operation;
mod replay;

pub use canonical::{
    float_text, quote_bytes, quote_text, render_tuple, CanonicalArgs, CanonicalText,
};
pub use counter::Counted;
pub use history::{inputs_key, outputs_key, Recorded};
pub use operation::Operation;
pub use replay::{replay, Replay, ReplayedCall};

use crate::backend::SharedBackend;

/// Wraps `op` with call counting (inner) and call history (outer).
pub fn instrument<O: Operation>(op: O, backend: SharedBackend) -> Recorded<Counted<O>> {
    Recorded::new(Counted::new(op, backend.clone()), backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::{Error, Result};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Records which backend state it observed when it ran.
    struct Probe {
        backend: SharedBackend,
    }

    #[async_trait]
    impl Operation for Probe {
        type Input = (i64,);
        type Output = String;

        fn identity(&self) -> &str {
            "Probe.run"
        }

        async fn call(&self, input: (i64,)) -> Result<String> {
            let (n,) = input;
            if n < 0 {
                return Err(Error::InvalidRequest("negative".into()));
            }
            let counter = self.backend.get("Probe.run").await?.unwrap_or_default();
            let inputs = self.backend.lrange("Probe.run:inputs", 0, -1).await?;
            Ok(format!(
                "count={} inputs={}",
                String::from_utf8_lossy(&counter),
                inputs.len()
            ))
        }
    }

    #[tokio::test]
    async fn test_stage_order_input_then_count_then_call() {
        let backend: SharedBackend = Arc::new(MemoryBackend::new());
        let op = instrument(
            Probe {
                backend: backend.clone(),
            },
            backend.clone(),
        );

        // Inside the call both the input and the increment are already visible
        assert_eq!(op.call((1,)).await.unwrap(), "count=1 inputs=1");
        assert_eq!(op.call((2,)).await.unwrap(), "count=2 inputs=2");
        assert_eq!(op.identity(), "Probe.run");
    }

    #[tokio::test]
    async fn test_failure_policy_counted_and_input_kept() {
        let backend: SharedBackend = Arc::new(MemoryBackend::new());
        let op = instrument(
            Probe {
                backend: backend.clone(),
            },
            backend.clone(),
        );

        op.call((1,)).await.unwrap();
        assert!(op.call((-1,)).await.is_err());

        let trace = replay(backend.as_ref(), "Probe.run").await.unwrap();
        assert_eq!(trace.count, 2);
        assert_eq!(trace.calls.len(), 1);
        assert_eq!(trace.calls[0].input, "(1,)");
        assert_eq!(
            backend.lrange("Probe.run:inputs", 0, -1).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn test_failed_increment_still_logs_input() {
        let backend: SharedBackend = Arc::new(MemoryBackend::new());
        // A list under the counter key makes INCR fail
        backend.rpush("Probe.run", b"x".to_vec()).await.unwrap();
        let op = instrument(
            Probe {
                backend: backend.clone(),
            },
            backend.clone(),
        );

        let result = op.call((1,)).await;

        assert!(matches!(result, Err(Error::WrongType(_))));
        assert_eq!(
            backend.lrange("Probe.run:inputs", 0, -1).await.unwrap(),
            vec![b"(1,)".to_vec()]
        );
        assert!(backend
            .lrange("Probe.run:outputs", 0, -1)
            .await
            .unwrap()
            .is_empty());
    }
}
