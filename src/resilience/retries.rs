//! Retry logic.
//!
//! # Responsibilities
//! - Re-run a fallible async operation a bounded number of times
//! - Sleep with exponential backoff + jitter between attempts
//! - Stop immediately on errors the caller marks as permanent

use std::fmt::Display;
use std::future::Future;

use crate::config::RetryConfig;
use crate::resilience::backoff::backoff_delay;

/// Run `operation` until it succeeds, fails permanently, or the attempt
/// budget is spent. The closure receives the 1-based attempt number.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    config: &RetryConfig,
    mut operation: F,
    is_retryable: R,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = if config.enabled {
        config.max_attempts.max(1)
    } else {
        1
    };

    let mut attempt = 1;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && is_retryable(&e) => {
                let delay = backoff_delay(attempt, config);
                tracing::info!(attempt, delay = ?delay, error = %e, "Retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
