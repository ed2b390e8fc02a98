//! Route comparison data model.

use serde::{Deserialize, Serialize};

use crate::directions::{DirectionsLeg, DirectionsRequest, TravelMode, Waypoint};

/// One routing question: origin to destination through a required waypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    pub waypoint: String,
}

impl RouteQuery {
    pub fn new(origin: &str, destination: &str, waypoint: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            waypoint: waypoint.to_string(),
        }
    }

    /// Driving directions forced through the waypoint as a stopover, with
    /// reordering disabled.
    pub fn to_request(&self) -> DirectionsRequest {
        DirectionsRequest {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            waypoints: vec![Waypoint {
                location: self.waypoint.clone(),
                stopover: true,
            }],
            travel_mode: TravelMode::Driving,
            optimize_waypoints: false,
        }
    }
}

/// Road name shown for a waypoint: the address up to its first comma.
pub fn waypoint_label(waypoint: &str) -> String {
    waypoint.split(',').next().unwrap_or_default().trim().to_string()
}

/// Which panel a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

/// A single fetched route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResult {
    pub waypoint_label: String,
    pub waypoint: String,
    pub distance_text: String,
    pub duration_text: String,
    pub step_count: usize,
}

impl RouteResult {
    pub fn from_leg(query: &RouteQuery, leg: DirectionsLeg) -> Self {
        Self {
            waypoint_label: waypoint_label(&query.waypoint),
            waypoint: query.waypoint.clone(),
            distance_text: leg.distance_text,
            duration_text: leg.duration_text,
            step_count: leg.step_count,
        }
    }
}

/// A route after comparison, tagged with its panel, rank, and color token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparedRoute {
    #[serde(flatten)]
    pub route: RouteResult,
    pub side: Side,
    pub is_best: bool,
    pub color: String,
}

/// Both routes of a successful comparison, faster one first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub origin: String,
    pub destination: String,
    pub better: ComparedRoute,
    pub worse: ComparedRoute,
}

impl ComparisonOutcome {
    /// The route shown in the given panel.
    pub fn on_side(&self, side: Side) -> &ComparedRoute {
        if self.better.side == side {
            &self.better
        } else {
            &self.worse
        }
    }
}

/// Display tokens handed to the winner and the runner-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub best: String,
    pub alternate: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            best: "#4CAF50".to_string(),
            alternate: "#FF6B6B".to_string(),
        }
    }
}
