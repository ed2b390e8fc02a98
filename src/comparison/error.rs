//! Comparison error definitions.

use serde::Serialize;
use thiserror::Error;

use crate::comparison::types::Side;
use crate::directions::ProviderError;
use crate::map::MapRenderError;

/// A single route fetch that did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("route via '{waypoint}' unavailable: {reason}")]
pub struct RouteUnavailable {
    pub waypoint: String,
    pub reason: ProviderError,
}

/// One failed side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideFailure {
    pub side: Side,
    #[serde(flatten)]
    pub failure: RouteUnavailable,
}

/// Errors surfaced by the comparison workflow.
#[derive(Debug, Clone, Error)]
pub enum CompareError {
    /// Provider client still coming up; try again shortly.
    #[error("directions provider is still loading")]
    ProviderLoading,

    /// Provider never became ready within the readiness bound.
    #[error("directions provider failed to load within {timeout_secs} seconds")]
    ProviderNotReady { timeout_secs: u64 },

    /// A single route fetch failed.
    #[error(transparent)]
    RouteUnavailable(#[from] RouteUnavailable),

    /// At least one side of the comparison failed; nothing partial is kept.
    #[error("route comparison failed ({} of 2 routes unavailable)", .failures.len())]
    ComparisonFailed { failures: Vec<SideFailure> },

    /// Drawing the winning route failed. Text results are unaffected.
    #[error("map rendering failed: {0}")]
    MapRenderFailed(#[from] MapRenderError),

    /// A comparison is already running.
    #[error("a route comparison is already in progress")]
    InProgress,

    /// The comparison task ended without producing a result.
    #[error("route comparison was interrupted")]
    Interrupted,
}

impl CompareError {
    /// Whether a boundary retry could change the outcome.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompareError::RouteUnavailable(failure) => failure.reason.is_retryable(),
            CompareError::ComparisonFailed { failures } => {
                !failures.is_empty() && failures.iter().all(|f| f.failure.reason.is_retryable())
            }
            _ => false,
        }
    }

    /// Per-side failure detail, when there is any.
    pub fn side_failures(&self) -> &[SideFailure] {
        match self {
            CompareError::ComparisonFailed { failures } => failures,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::DirectionsStatus;

    fn failure(side: Side, reason: ProviderError) -> SideFailure {
        SideFailure {
            side,
            failure: RouteUnavailable {
                waypoint: "Lee Highway, Centreville, VA".to_string(),
                reason,
            },
        }
    }

    #[test]
    fn test_retryable_only_when_every_side_is() {
        let transient = CompareError::ComparisonFailed {
            failures: vec![failure(Side::First, ProviderError::Http(503))],
        };
        assert!(transient.is_retryable());

        let mixed = CompareError::ComparisonFailed {
            failures: vec![
                failure(Side::First, ProviderError::Http(503)),
                failure(Side::Second, ProviderError::Status(DirectionsStatus::NotFound)),
            ],
        };
        assert!(!mixed.is_retryable());
        assert!(!CompareError::InProgress.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = CompareError::ComparisonFailed {
            failures: vec![failure(Side::Second, ProviderError::EmptyRoute)],
        };
        assert_eq!(err.to_string(), "route comparison failed (1 of 2 routes unavailable)");

        let err = CompareError::ProviderNotReady { timeout_secs: 30 };
        assert!(err.to_string().contains("30 seconds"));
    }
}
