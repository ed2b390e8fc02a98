//! Route comparison subsystem.
//!
//! # Data Flow
//! ```text
//! (origin, destination, waypoint A, waypoint B)
//!     → comparator.rs (fan out two fetches, join both)
//!     → fetch.rs (one provider call under a deadline → RouteResult)
//!     → duration.rs (duration text → minutes)
//!     → comparator.rs (minutes A <= minutes B ? A : B)
//!     → ComparisonOutcome | CompareError::ComparisonFailed
//! ```
//!
//! # Design Decisions
//! - Both fetches run concurrently; wall time is the slower of the two
//! - All-or-nothing: one failed side fails the comparison
//! - Ties go to the first-listed route
//! - No retries here; the session retries at the boundary

pub mod comparator;
pub mod duration;
pub mod error;
pub mod fetch;
pub mod types;

pub use comparator::{select_best, RouteComparator};
pub use duration::parse_duration;
pub use error::{CompareError, RouteUnavailable, SideFailure};
pub use fetch::fetch_route;
pub use types::{ComparedRoute, ComparisonOutcome, Palette, RouteQuery, RouteResult, Side};
