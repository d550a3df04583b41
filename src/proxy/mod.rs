//! Development proxy subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path)
//!     → rule.rs (first rule whose prefix the path starts with)
//!     → rule.rs (rewrite URI to the backend origin)
//!     → headers.rs (strip hop-by-hop, add X-Forwarded-*)
//!     → forward.rs (send via pooled client, stream response back)
//! ```
//!
//! # Design Decisions
//! - Rules are static: loaded once at startup, never reloaded
//! - Path and query are forwarded byte-for-byte unless `strip_prefix` is set
//! - No retries, no backpressure: a failed upstream is a failed request
//! - Requests that match no rule never touch the forwarder

pub mod forward;
pub mod headers;
pub mod rule;

use thiserror::Error;

pub use forward::Forwarder;
pub use rule::{ProxyRule, ProxyTable};

/// Errors raised while building or applying proxy rules.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Rule prefix is not an absolute path.
    #[error("invalid proxy prefix `{0}`: must start with '/'")]
    InvalidPrefix(String),

    /// Target is not a plain `http://host[:port]` origin.
    #[error("invalid proxy target `{target}`: {reason}")]
    InvalidTarget { target: String, reason: String },

    /// The forwarded URI could not be built.
    #[error("failed to rewrite request URI: {0}")]
    Rewrite(String),

    /// Connection or protocol failure talking to the backend.
    #[error("upstream {target} request failed: {reason}")]
    Upstream { target: String, reason: String },

    /// Backend did not start responding in time.
    #[error("upstream {target} timed out after {secs} seconds")]
    Timeout { target: String, secs: u64 },
}
