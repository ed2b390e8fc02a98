//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → readiness monitor stops polling
//!             → config reload loop exits
//!             → HTTP server stops accepting and drains
//! ```
//!
//! # Design Decisions
//! - One broadcast channel; every long-running task subscribes
//! - A comparison already in flight is allowed to finish

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::{shutdown_on_signal, wait_for_signal};
