//! Google Directions web service client.

use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use url::Url;

use crate::config::ProviderConfig;
use crate::directions::provider::DirectionsProvider;
use crate::directions::types::{
    DirectionsLeg, DirectionsRequest, DirectionsResponse, DirectionsStatus, ProviderError,
};

/// Location used for the readiness probe. Any decodable answer that is not
/// a key rejection counts as "reachable".
const PROBE_LOCATION: &str = "0,0";

/// Directions provider backed by the Google Directions JSON API.
pub struct GoogleDirectionsProvider {
    client: Client,
    base_url: Url,
    api_key: String,
    timeout: Duration,
    ready: AtomicBool,
}

impl GoogleDirectionsProvider {
    /// Build the HTTP client. The provider starts out not ready; the
    /// readiness monitor calls [`DirectionsProvider::initialize`].
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ProviderError::NotInitialized(format!(
                "invalid directions base URL '{}': {}",
                config.base_url, e
            ))
        })?;
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotInitialized(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            timeout,
            ready: AtomicBool::new(false),
        })
    }

    fn request_url(&self, request: &DirectionsRequest) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("origin", &request.origin)
                .append_pair("destination", &request.destination);
            if !request.waypoints.is_empty() {
                pairs.append_pair("waypoints", &encode_waypoints(request));
            }
            pairs.append_pair("mode", request.travel_mode.as_str());
            if !self.api_key.is_empty() {
                pairs.append_pair("key", &self.api_key);
            }
        }
        url
    }

    async fn fetch(&self, url: Url) -> Result<DirectionsResponse, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        let body: DirectionsResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))?;

        if let Some(message) = &body.error_message {
            tracing::debug!(status = %body.status, message = %message, "Directions provider message");
        }
        Ok(body)
    }

    // The request URL carries the API key; keep it out of error text.
    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                millis: self.timeout.as_millis() as u64,
            }
        } else {
            ProviderError::Transport(err.without_url().to_string())
        }
    }
}

/// `waypoints` parameter: `optimize:true|` prefix when reordering is allowed,
/// `via:` prefix for pass-through points, `|` between entries.
fn encode_waypoints(request: &DirectionsRequest) -> String {
    let mut parts = Vec::with_capacity(request.waypoints.len() + 1);
    if request.optimize_waypoints {
        parts.push("optimize:true".to_string());
    }
    for waypoint in &request.waypoints {
        if waypoint.stopover {
            parts.push(waypoint.location.clone());
        } else {
            parts.push(format!("via:{}", waypoint.location));
        }
    }
    parts.join("|")
}

impl DirectionsProvider for GoogleDirectionsProvider {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsLeg, ProviderError> {
        let url = self.request_url(request);
        self.fetch(url).await?.into_first_leg()
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    async fn initialize(&self) -> Result<(), ProviderError> {
        if self.is_ready() {
            return Ok(());
        }
        if self.api_key.is_empty() {
            return Err(ProviderError::NotInitialized(
                "no directions API key configured".to_string(),
            ));
        }

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("origin", PROBE_LOCATION)
            .append_pair("destination", PROBE_LOCATION)
            .append_pair("key", &self.api_key);

        let body = self.fetch(url).await?;
        if body.status == DirectionsStatus::RequestDenied {
            return Err(ProviderError::Status(body.status));
        }

        self.ready.store(true, Ordering::Release);
        tracing::info!(base_url = %self.base_url, "Directions provider ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::types::{TravelMode, Waypoint};

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            base_url: "https://maps.example.test/directions/json".to_string(),
            api_key: "secret".to_string(),
            ..ProviderConfig::default()
        }
    }

    fn request(stopover: bool, optimize: bool) -> DirectionsRequest {
        DirectionsRequest {
            origin: "12907 Swedes Street, Centreville, VA".to_string(),
            destination: "Lucky Strike, Centreville, VA".to_string(),
            waypoints: vec![Waypoint {
                location: "Lee Highway, Centreville, VA".to_string(),
                stopover,
            }],
            travel_mode: TravelMode::Driving,
            optimize_waypoints: optimize,
        }
    }

    #[test]
    fn test_request_url_parameters() {
        let provider = GoogleDirectionsProvider::new(&test_config()).unwrap();
        let url = provider.request_url(&request(true, false));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&("origin".into(), "12907 Swedes Street, Centreville, VA".into())));
        assert!(pairs.contains(&("destination".into(), "Lucky Strike, Centreville, VA".into())));
        assert!(pairs.contains(&("waypoints".into(), "Lee Highway, Centreville, VA".into())));
        assert!(pairs.contains(&("mode".into(), "driving".into())));
        assert!(pairs.contains(&("key".into(), "secret".into())));
    }

    #[test]
    fn test_waypoint_encoding() {
        assert_eq!(
            encode_waypoints(&request(false, true)),
            "optimize:true|via:Lee Highway, Centreville, VA"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = test_config();
        config.base_url = "not a url".to_string();
        let err = GoogleDirectionsProvider::new(&config).err().unwrap();
        assert!(matches!(err, ProviderError::NotInitialized(_)));
    }

    #[tokio::test]
    async fn test_initialize_requires_api_key() {
        let mut config = test_config();
        config.api_key.clear();
        let provider = GoogleDirectionsProvider::new(&config).unwrap();
        assert!(!provider.is_ready());
        assert!(provider.initialize().await.is_err());
        assert!(!provider.is_ready());
    }
}
