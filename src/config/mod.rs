//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → CLI overrides applied
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → RoutesConfig handed to the route table builder
//! ```
//!
//! # Design Decisions
//! - Config is passed explicitly; there is no global instance
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, load_with_overrides, ConfigError, ConfigOverrides};
pub use schema::{ListenerConfig, ObservabilityConfig, RouterConfig, RoutesConfig};
