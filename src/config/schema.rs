//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the route
//! comparator. All types derive Serde traits for deserialization from config
//! files, and every section has defaults so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ComparatorConfig {
    /// HTTP API settings.
    pub server: ServerConfig,

    /// Directions provider settings.
    pub provider: ProviderConfig,

    /// The two routes being compared.
    pub route: RouteConfig,

    /// Provider readiness polling.
    pub readiness: ReadinessConfig,

    /// Boundary retry configuration.
    pub retries: RetryConfig,

    /// Map rendering of the winning route.
    pub map: MapConfig,

    /// Display tokens handed to the presentation layer.
    pub display: DisplayConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP API configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Upper bound on a single API request, comparison retries included.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Directions provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    /// Directions JSON endpoint.
    pub base_url: String,

    /// API key. Prefer the environment variable named by `api_key_env`.
    pub api_key: String,

    /// Environment variable that overrides `api_key` when set.
    pub api_key_env: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/directions/json".to_string(),
            api_key: String::new(),
            api_key_env: "GOOGLE_MAPS_API_KEY".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Fixed endpoints and the two waypoints to compare.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RouteConfig {
    pub origin: String,
    pub destination: String,

    /// Shown in the first (left) panel; wins ties.
    pub first_waypoint: String,

    /// Shown in the second (right) panel.
    pub second_waypoint: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            origin: "12907 Swedes Street, Centreville, VA".to_string(),
            destination: "Lucky Strike, Centreville, VA".to_string(),
            first_waypoint: "Lee Highway, Centreville, VA".to_string(),
            second_waypoint: "Leland Road, Centreville, VA".to_string(),
        }
    }
}

/// Provider readiness polling.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Delay between readiness checks in milliseconds.
    pub poll_interval_ms: u64,

    /// Give up and report "failed to load" after this many seconds.
    pub timeout_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            timeout_secs: 30,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Maximum number of attempts, the first one included.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 2,
            base_delay_ms: 2000,
            max_delay_ms: 8000,
        }
    }
}

/// Map rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Render the winning route.
    pub enabled: bool,

    /// Static map image endpoint.
    pub base_url: String,

    /// Image size in pixels.
    pub width: u32,
    pub height: u32,

    /// Polyline width in pixels.
    pub stroke_weight: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://maps.googleapis.com/maps/api/staticmap".to_string(),
            width: 640,
            height: 400,
            stroke_weight: 5,
        }
    }
}

/// Color tokens for the two panels.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub best_color: String,
    pub alternate_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            best_color: "#4CAF50".to_string(),
            alternate_color: "#FF6B6B".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ComparatorConfig = toml::from_str("").unwrap();
        assert_eq!(config, ComparatorConfig::default());
        assert_eq!(config.readiness.timeout_secs, 30);
        assert_eq!(config.route.first_waypoint, "Lee Highway, Centreville, VA");
    }

    #[test]
    fn test_partial_section() {
        let config: ComparatorConfig = toml::from_str(
            r#"
            [route]
            first_waypoint = "Braddock Road, Centreville, VA"

            [retries]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.route.first_waypoint, "Braddock Road, Centreville, VA");
        assert_eq!(config.route.second_waypoint, "Leland Road, Centreville, VA");
        assert!(!config.retries.enabled);
        assert_eq!(config.retries.max_attempts, 2);
    }
}
