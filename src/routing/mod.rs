//! Client-side routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation event (initial load, push, pop)
//!     → history.rs (browser URL → router path)
//!     → table.rs (linear scan, first match wins)
//!     → pattern.rs (segment match, parameter extraction)
//!     → navigator.rs (atomic swap of the current navigation)
//!     → Return: (component, params) or not-found
//! ```
//!
//! # Design Decisions
//! - Tables are built once per deployment profile, immutable afterwards
//! - No regex, no wildcards, no redirects or guards
//! - Deterministic: same path always resolves to the same entry
//! - Ambiguous tables are rejected when built from configuration

pub mod history;
pub mod navigator;
pub mod pattern;
pub mod table;

use thiserror::Error;

pub use history::{HistoryKind, HistoryMode};
pub use navigator::{Navigation, NavigationTrigger, Navigator};
pub use pattern::{Params, RoutePattern};
pub use table::{ComponentId, ResolvedRoute, RouteEntry, RouteTable};

/// Errors raised while building route tables.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// A path pattern could not be parsed.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },

    /// Two entries in the same table can match one path.
    #[error("routes `{first}` and `{second}` can match the same path")]
    Ambiguous { first: String, second: String },
}
