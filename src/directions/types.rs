//! Directions request/response types and provider errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Travel mode sent with every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
        }
    }
}

/// An intermediate location the route must pass through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub location: String,
    /// A stopover splits the route into separate legs; a pass-through does not.
    pub stopover: bool,
}

/// A single directions query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<Waypoint>,
    pub travel_mode: TravelMode,
    pub optimize_waypoints: bool,
}

/// The first leg of the first route, reduced to what the comparator reads.
///
/// Distance and duration are the provider's display strings, copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsLeg {
    pub distance_text: String,
    pub duration_text: String,
    pub step_count: usize,
}

/// Status token returned in the body of every directions response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DirectionsStatus {
    Ok,
    NotFound,
    ZeroResults,
    MaxWaypointsExceeded,
    MaxRouteLengthExceeded,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    Other(String),
}

impl DirectionsStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DirectionsStatus::Ok => "OK",
            DirectionsStatus::NotFound => "NOT_FOUND",
            DirectionsStatus::ZeroResults => "ZERO_RESULTS",
            DirectionsStatus::MaxWaypointsExceeded => "MAX_WAYPOINTS_EXCEEDED",
            DirectionsStatus::MaxRouteLengthExceeded => "MAX_ROUTE_LENGTH_EXCEEDED",
            DirectionsStatus::InvalidRequest => "INVALID_REQUEST",
            DirectionsStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            DirectionsStatus::RequestDenied => "REQUEST_DENIED",
            DirectionsStatus::UnknownError => "UNKNOWN_ERROR",
            DirectionsStatus::Other(token) => token,
        }
    }

    /// Statuses worth asking again for. The rest describe the query itself.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DirectionsStatus::OverQueryLimit | DirectionsStatus::UnknownError
        )
    }
}

impl From<String> for DirectionsStatus {
    fn from(token: String) -> Self {
        match token.as_str() {
            "OK" => DirectionsStatus::Ok,
            "NOT_FOUND" => DirectionsStatus::NotFound,
            "ZERO_RESULTS" => DirectionsStatus::ZeroResults,
            "MAX_WAYPOINTS_EXCEEDED" => DirectionsStatus::MaxWaypointsExceeded,
            "MAX_ROUTE_LENGTH_EXCEEDED" => DirectionsStatus::MaxRouteLengthExceeded,
            "INVALID_REQUEST" => DirectionsStatus::InvalidRequest,
            "OVER_QUERY_LIMIT" => DirectionsStatus::OverQueryLimit,
            "REQUEST_DENIED" => DirectionsStatus::RequestDenied,
            "UNKNOWN_ERROR" => DirectionsStatus::UnknownError,
            _ => DirectionsStatus::Other(token),
        }
    }
}

impl From<DirectionsStatus> for String {
    fn from(status: DirectionsStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DirectionsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from a single provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProviderError {
    /// The provider answered with a non-OK status token.
    #[error("directions provider returned status {0}")]
    Status(DirectionsStatus),

    /// The HTTP exchange itself failed with a non-success code.
    #[error("directions provider returned HTTP {0}")]
    Http(u16),

    /// Connection-level failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body could not be decoded.
    #[error("malformed directions response: {0}")]
    Decode(String),

    /// The call exceeded its deadline.
    #[error("directions request timed out after {millis} ms")]
    Timeout { millis: u64 },

    /// Status was OK but no route/leg came back.
    #[error("directions response contained no route leg")]
    EmptyRoute,

    /// The client could not be brought up.
    #[error("directions provider not initialized: {0}")]
    NotInitialized(String),
}

impl ProviderError {
    /// Whether asking again could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Status(status) => status.is_transient(),
            ProviderError::Http(code) => *code >= 500 || *code == 429,
            ProviderError::Transport(_) | ProviderError::Timeout { .. } => true,
            ProviderError::Decode(_)
            | ProviderError::EmptyRoute
            | ProviderError::NotInitialized(_) => false,
        }
    }

    /// Short token for logs and metric labels.
    pub fn status_label(&self) -> String {
        match self {
            ProviderError::Status(status) => status.to_string(),
            ProviderError::Http(code) => format!("HTTP_{}", code),
            ProviderError::Transport(_) => "TRANSPORT".to_string(),
            ProviderError::Decode(_) => "DECODE".to_string(),
            ProviderError::Timeout { .. } => "TIMEOUT".to_string(),
            ProviderError::EmptyRoute => "EMPTY_ROUTE".to_string(),
            ProviderError::NotInitialized(_) => "NOT_INITIALIZED".to_string(),
        }
    }
}

// --- Wire format of the directions web service ---

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    pub status: DirectionsStatus,
    #[serde(default)]
    pub routes: Vec<RouteBody>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteBody {
    #[serde(default)]
    pub legs: Vec<LegBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegBody {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub steps: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextValue {
    pub text: String,
}

impl DirectionsResponse {
    /// First leg of the first route, or the reason there is none.
    pub(crate) fn into_first_leg(self) -> Result<DirectionsLeg, ProviderError> {
        if self.status != DirectionsStatus::Ok {
            return Err(ProviderError::Status(self.status));
        }
        let leg = self
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.legs.into_iter().next())
            .ok_or(ProviderError::EmptyRoute)?;

        Ok(DirectionsLeg {
            distance_text: leg.distance.text,
            duration_text: leg.duration.text,
            step_count: leg.steps.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tokens() {
        assert_eq!(DirectionsStatus::from("OK".to_string()), DirectionsStatus::Ok);
        assert_eq!(
            DirectionsStatus::from("ZERO_RESULTS".to_string()),
            DirectionsStatus::ZeroResults
        );
        let other = DirectionsStatus::from("SOMETHING_NEW".to_string());
        assert_eq!(other, DirectionsStatus::Other("SOMETHING_NEW".into()));
        assert_eq!(other.to_string(), "SOMETHING_NEW");
    }

    #[test]
    fn test_first_leg_extraction() {
        let body = r#"{
            "status": "OK",
            "routes": [{
                "legs": [
                    {"distance": {"text": "3.2 mi", "value": 5150},
                     "duration": {"text": "9 mins", "value": 540},
                     "steps": [{}, {}, {}]},
                    {"distance": {"text": "1.0 mi", "value": 1609},
                     "duration": {"text": "3 mins", "value": 180},
                     "steps": [{}]}
                ]
            }]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(body).unwrap();
        let leg = response.into_first_leg().unwrap();
        assert_eq!(leg.distance_text, "3.2 mi");
        assert_eq!(leg.duration_text, "9 mins");
        assert_eq!(leg.step_count, 3);
    }

    #[test]
    fn test_non_ok_status_is_error() {
        let body = r#"{"status": "NOT_FOUND", "routes": []}"#;
        let response: DirectionsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.into_first_leg(),
            Err(ProviderError::Status(DirectionsStatus::NotFound))
        );
    }

    #[test]
    fn test_ok_without_legs_is_empty_route() {
        let body = r#"{"status": "OK", "routes": [{"legs": []}]}"#;
        let response: DirectionsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_first_leg(), Err(ProviderError::EmptyRoute));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ProviderError::Status(DirectionsStatus::OverQueryLimit).is_retryable());
        assert!(ProviderError::Http(503).is_retryable());
        assert!(ProviderError::Timeout { millis: 10 }.is_retryable());
        assert!(!ProviderError::Status(DirectionsStatus::ZeroResults).is_retryable());
        assert!(!ProviderError::Http(400).is_retryable());
        assert!(!ProviderError::EmptyRoute.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::Status(DirectionsStatus::RequestDenied);
        assert_eq!(err.to_string(), "directions provider returned status REQUEST_DENIED");
        assert_eq!(err.status_label(), "REQUEST_DENIED");
    }
}
