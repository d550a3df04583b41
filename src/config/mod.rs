//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in defaults
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (bind address, profile, dist dir)
//!     → validation.rs (semantic checks)
//!     → DevServerConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup; proxy rules never change at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::DevServerConfig;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ProfileConfig;
pub use schema::ProxyRuleConfig;
pub use schema::RouteConfig;
pub use schema::StaticConfig;
pub use schema::TimeoutConfig;
pub use validation::{validate_config, ValidationError};
