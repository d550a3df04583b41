//! Runner dashboard development server and client-route resolver.

pub mod config;
pub mod http;
pub mod inspect;
pub mod lifecycle;
pub mod observability;
pub mod profile;
pub mod proxy;
pub mod routing;

pub use config::schema::DevServerConfig;
pub use http::DevServer;
pub use lifecycle::Shutdown;
pub use profile::DeploymentProfile;
pub use routing::{Navigator, RouteTable};
