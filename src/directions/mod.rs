//! Directions provider subsystem.
//!
//! # Data Flow
//! ```text
//! RouteQuery
//!     → DirectionsRequest (one stopover waypoint, driving, no reordering)
//!     → provider.rs (DirectionsProvider trait, the only async seam)
//!     → google.rs (HTTP GET, status token, first leg of first route)
//!     → DirectionsLeg | ProviderError
//! ```
//!
//! # Design Decisions
//! - Distance and duration stay as provider display strings
//! - Any non-OK status is an error; no partial legs are surfaced
//! - Readiness lives on the provider; gating lives in `health`

pub mod google;
pub mod provider;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use google::GoogleDirectionsProvider;
pub use provider::DirectionsProvider;
pub use types::{
    DirectionsLeg, DirectionsRequest, DirectionsStatus, ProviderError, TravelMode, Waypoint,
};
