//! Bounded forwarding of a single worker call.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::debug;
use worker_protocol::{WorkerError, WorkerResult};

use crate::metrics;

/// Await `call` for at most `deadline`.
///
/// On expiry the in-flight call is dropped and reported as
/// `WorkerError::Timeout`. Nothing is retried.
pub async fn with_deadline<T, F>(
    operation: &'static str,
    deadline: Duration,
    call: F,
) -> WorkerResult<T>
where
    F: Future<Output = WorkerResult<T>>,
{
    let started = Instant::now();

    let result = match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(WorkerError::Timeout(deadline)),
    };

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    let elapsed = started.elapsed();
    debug!(
        operation,
        outcome,
        elapsed_ms = elapsed.as_millis() as u64,
        "Worker call finished"
    );
    metrics::record_worker_call(operation, outcome, elapsed);

    result
}
