//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Provider call:
//!     → timeouts.rs (every call has a deadline)
//! Comparison at the session boundary:
//!     → retries.rs (retry transient failures with backoff.rs delays)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Retries wrap the whole comparison, never a single side
//! - Only transient provider failures are retried

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::retry_with_backoff;
pub use timeouts::call_with_timeout;
