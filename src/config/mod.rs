//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routes.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RoutekitConfig (validated, immutable)
//!     → Router::from_config
//!
//! On reload:
//!     watcher.rs detects change
//!     → loader.rs loads new table
//!     → validation.rs validates
//!     → a fresh Router is published; the old one is never mutated
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults so a file can hold only `[[routes]]`
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    DefaultSetting, LogFormat, ObservabilityConfig, RouteDefinition, RoutekitConfig, ServerConfig,
};
pub use validation::{validate_config, ValidationError};
