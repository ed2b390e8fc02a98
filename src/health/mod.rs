//! Provider readiness subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     active.rs polls the provider every poll_interval
//!     → provider.initialize() while not ready
//!     → state.rs gate settles: Ready, or Failed after the timeout
//!
//! Comparison request:
//!     session checks the gate
//!     → Loading: transient "still loading"
//!     → Failed: terminal "failed to load"
//!     → Ready: go ahead
//! ```
//!
//! # Design Decisions
//! - Polling is bounded; no indefinite retry
//! - The terminal failure is logged exactly once

pub mod active;
pub mod state;

pub use active::ReadinessMonitor;
pub use state::{ReadinessGate, ReadinessState};
