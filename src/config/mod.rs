//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + environment (API key)
//!     → loader.rs (parse, env overrides)
//!     → validation.rs (semantic checks)
//!     → ComparatorConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → route section swapped into the running session
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; the defaults are the Centreville routes
//! - Only the route section is hot-reloaded; everything else needs a restart
//! - The API key is read from the environment, never logged

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{default_config, load_config, parse_config, ConfigError};
pub use schema::{
    ComparatorConfig, DisplayConfig, MapConfig, ObservabilityConfig, ProviderConfig,
    ReadinessConfig, RetryConfig, RouteConfig, ServerConfig,
};
pub use watcher::ConfigWatcher;
