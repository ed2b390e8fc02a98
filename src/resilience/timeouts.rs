//! Timeout enforcement for provider calls.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::directions::ProviderError;

/// Run a provider call under a deadline.
///
/// An elapsed deadline becomes [`ProviderError::Timeout`]; the inner future
/// is dropped.
pub async fn call_with_timeout<T, F>(deadline: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout {
            millis: deadline.as_millis() as u64,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deadline_elapses() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, ProviderError>(1)
        };
        let result = call_with_timeout(Duration::from_millis(20), slow).await;
        assert_eq!(result, Err(ProviderError::Timeout { millis: 20 }));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let fast = async { Ok::<_, ProviderError>(7) };
        assert_eq!(call_with_timeout(Duration::from_secs(1), fast).await, Ok(7));
    }
}
