//! Map rendering for the winning route.
//!
//! # Design Decisions
//! - Optional capability injected into the session, not a separate code path
//! - A render failure never blocks the textual result

pub mod static_map;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::comparison::ComparisonOutcome;

pub use static_map::StaticMapRenderer;

/// What the map draws: one polyline and its two endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRoute {
    pub origin: String,
    pub destination: String,
    pub waypoint: String,
    pub color: String,
}

impl MapRoute {
    /// The winning route of an outcome, in the winner's color.
    pub fn best_of(outcome: &ComparisonOutcome) -> Self {
        Self {
            origin: outcome.origin.clone(),
            destination: outcome.destination.clone(),
            waypoint: outcome.better.route.waypoint.clone(),
            color: outcome.better.color.clone(),
        }
    }
}

/// A rendered map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapView {
    pub image_url: String,
    pub color: String,
}

/// Errors raised while drawing a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapRenderError {
    #[error("invalid map base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("color token '{0}' is not #RRGGBB")]
    InvalidColor(String),

    #[error("location '{0}' cannot be drawn")]
    InvalidLocation(String),
}

/// Draws a route.
pub trait MapRenderer: Send + Sync {
    fn render(&self, route: &MapRoute) -> Result<MapView, MapRenderError>;
}
