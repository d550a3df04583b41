//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → proxy prefix matched? → proxy::Forwarder → backend
//!     → otherwise spa.rs (asset, document fallback, redirect, 404)
//!     → response.rs (error mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod spa;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, DevServer};
pub use spa::SpaService;
