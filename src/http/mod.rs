//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → handlers.rs
//!         GET  /health       readiness of the directions provider
//!         GET  /api/state    current presentation event
//!         POST /api/compare  run a comparison
//!         POST /api/reset    dismiss, back to idle
//!     → JSON response
//! ```

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::{build_router, ComparatorServer};
