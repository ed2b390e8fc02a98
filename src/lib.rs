//! Route comparison library: fetch two candidate routes concurrently, rank
//! them by travel time, and present the faster one.

pub mod comparison;
pub mod config;
pub mod directions;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod map;
pub mod observability;
pub mod resilience;
pub mod session;

pub use comparison::{CompareError, ComparisonOutcome, RouteComparator};
pub use config::ComparatorConfig;
pub use http::ComparatorServer;
pub use lifecycle::Shutdown;
pub use session::ComparisonSession;
