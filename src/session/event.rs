//! Presentation events.

use serde::Serialize;

use crate::comparison::{CompareError, ComparisonOutcome, SideFailure};
use crate::map::MapView;

/// Message shown for any failed comparison.
pub const GENERIC_FAILURE: &str =
    "Unable to calculate routes. Please check your connection and try again.";

/// Shown while the directions provider is still coming up. Cleared on its
/// own once the provider is ready.
pub const PROVIDER_LOADING: &str =
    "Directions are still loading. Please wait a moment and try again.";

/// What the presentation layer should be showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ComparisonEvent {
    /// Nothing shown; both panels hidden.
    Idle,

    /// Both panels show a spinner under their waypoint label.
    Loading {
        first_label: String,
        second_label: String,
    },

    /// Both routes with the best one marked, and the map when it rendered.
    Result {
        outcome: ComparisonOutcome,
        map: Option<MapView>,
    },

    /// A single error panel with a dismiss action.
    Failed {
        message: String,
        /// Terminal failures will not clear up by asking again.
        terminal: bool,
        failures: Vec<SideFailure>,
    },
}

impl ComparisonEvent {
    pub fn failed(error: &CompareError) -> Self {
        let (message, terminal) = match error {
            CompareError::ProviderLoading => (PROVIDER_LOADING.to_string(), false),
            CompareError::ProviderNotReady { .. } => (
                "Directions failed to load. Please restart and try again.".to_string(),
                true,
            ),
            _ => (GENERIC_FAILURE.to_string(), false),
        };
        ComparisonEvent::Failed {
            message,
            terminal,
            failures: error.side_failures().to_vec(),
        }
    }

    /// The transient "still loading" notice.
    pub fn is_loading_notice(&self) -> bool {
        matches!(
            self,
            ComparisonEvent::Failed { message, terminal: false, .. } if message == PROVIDER_LOADING
        )
    }

    /// Label used for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            ComparisonEvent::Idle => "idle",
            ComparisonEvent::Loading { .. } => "loading",
            ComparisonEvent::Result { .. } => "result",
            ComparisonEvent::Failed { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(ComparisonEvent::Idle).unwrap();
        assert_eq!(json["state"], "idle");

        let json = serde_json::to_value(ComparisonEvent::Loading {
            first_label: "Lee Highway".into(),
            second_label: "Leland Road".into(),
        })
        .unwrap();
        assert_eq!(json["state"], "loading");
        assert_eq!(json["first_label"], "Lee Highway");
    }

    #[test]
    fn test_failure_messages() {
        match ComparisonEvent::failed(&CompareError::ComparisonFailed { failures: vec![] }) {
            ComparisonEvent::Failed { message, terminal, .. } => {
                assert_eq!(message, GENERIC_FAILURE);
                assert!(!terminal);
            }
            other => panic!("unexpected event {:?}", other),
        }
        match ComparisonEvent::failed(&CompareError::ProviderNotReady { timeout_secs: 30 }) {
            ComparisonEvent::Failed { terminal, .. } => assert!(terminal),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_loading_notice() {
        assert!(ComparisonEvent::failed(&CompareError::ProviderLoading).is_loading_notice());
        assert!(!ComparisonEvent::failed(&CompareError::Interrupted).is_loading_notice());
        assert!(!ComparisonEvent::Idle.is_loading_notice());
    }
}
