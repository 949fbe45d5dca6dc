//! Exponential backoff for transient feed fetch failures.

use std::future::Future;
use std::time::Duration;

use crate::error::IngestError;

/// Network failures, 429 and 5xx responses are worth another attempt.
/// Anything else (4xx, unparseable bodies) would fail the same way again.
fn is_retriable(err: &IngestError) -> bool {
    match err {
        IngestError::Http(_) | IngestError::RateLimited { .. } => true,
        IngestError::UnexpectedStatus { status, .. } => *status >= 500,
        IngestError::Parse { .. } | IngestError::Config(_) => false,
    }
}

/// Runs `operation`, retrying transient errors up to `max_retries` times.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds. Non-retriable errors and the last error after exhausting the
/// retries are returned as-is.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, IngestError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IngestError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient feed error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
