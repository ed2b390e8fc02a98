//! Exponential backoff with jitter.

use rand::Rng;
use std::time::Duration;

use crate::config::RetryConfig;

/// Delay before retry number `retry` (1-based): `base * 2^(retry-1)`,
/// capped at the configured maximum, plus up to 10% jitter.
pub fn backoff_delay(retry: u32, config: &RetryConfig) -> Duration {
    if retry == 0 {
        return Duration::ZERO;
    }

    let factor = 2u64.saturating_pow(retry - 1);
    let capped = config.base_delay_ms.saturating_mul(factor).min(config.max_delay_ms);

    let jitter_range = capped / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped + jitter)
}
