//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required route fields present, waypoints distinct
//! - Value ranges (timeouts, intervals, attempts > 0)
//! - URLs, socket addresses and color tokens parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ComparatorConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::ComparatorConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("route.first_waypoint and route.second_waypoint must differ")]
    IdenticalWaypoints,

    #[error("{field} is not a valid URL: '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} is not a valid socket address: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} is not a #RRGGBB color: '{value}'")]
    InvalidColor { field: &'static str, value: String },
}

pub fn validate_config(config: &ComparatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let route = &config.route;
    for (field, value) in [
        ("route.origin", &route.origin),
        ("route.destination", &route.destination),
        ("route.first_waypoint", &route.first_waypoint),
        ("route.second_waypoint", &route.second_waypoint),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty(field));
        }
    }
    if !route.first_waypoint.trim().is_empty()
        && route.first_waypoint.trim().eq_ignore_ascii_case(route.second_waypoint.trim())
    {
        errors.push(ValidationError::IdenticalWaypoints);
    }

    for (field, value) in [
        ("server.request_timeout_secs", config.server.request_timeout_secs),
        ("provider.request_timeout_secs", config.provider.request_timeout_secs),
        ("readiness.poll_interval_ms", config.readiness.poll_interval_ms),
        ("readiness.timeout_secs", config.readiness.timeout_secs),
        ("retries.max_attempts", u64::from(config.retries.max_attempts)),
    ] {
        if value == 0 {
            errors.push(ValidationError::Zero(field));
        }
    }

    let mut urls = vec![("provider.base_url", &config.provider.base_url)];
    if config.map.enabled {
        urls.push(("map.base_url", &config.map.base_url));
    }
    for (field, value) in urls {
        if Url::parse(value).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.clone(),
            });
        }
    }

    let mut addresses = vec![("server.bind_address", &config.server.bind_address)];
    if config.observability.metrics_enabled {
        addresses.push(("observability.metrics_address", &config.observability.metrics_address));
    }
    for (field, value) in addresses {
        if value.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.clone(),
            });
        }
    }

    for (field, value) in [
        ("display.best_color", &config.display.best_color),
        ("display.alternate_color", &config.display.alternate_color),
    ] {
        if !is_hex_color(value) {
            errors.push(ValidationError::InvalidColor {
                field,
                value: value.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_hex_color(token: &str) -> bool {
    token
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
