//! Comparison session subsystem.
//!
//! # Data Flow
//! ```text
//! UI action (POST /api/compare, --once)
//!     → session.rs: readiness gate → in-flight guard → Loading
//!     → comparator (with boundary retry)
//!     → map renderer (optional, non-fatal)
//!     → Result | Failed
//!     → presenter.rs + current state
//!
//! User dismissal (POST /api/reset)
//!     → Idle
//! ```
//!
//! # Design Decisions
//! - One explicit context object; no process-wide flags
//! - Re-entrant requests are ignored, not queued
//! - Failures collapse to one generic message; per-side detail is kept
//! - A comparison runs on its own task; dropping the caller does not strand `Loading`

pub mod event;
pub mod presenter;
#[allow(clippy::module_inception)]
pub mod session;

pub use event::{ComparisonEvent, GENERIC_FAILURE, PROVIDER_LOADING};
pub use presenter::{render_panels, ConsolePresenter, LogPresenter, Presenter};
pub use session::ComparisonSession;
