//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::HistoryKind;

/// Base path the runner UI is mounted under.
pub const DEFAULT_BASE: &str = "/runner";

/// Origin of the local runner backend.
pub const DEFAULT_BACKEND: &str = "http://127.0.0.1:1337";

/// Root configuration for the dev server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Name of the active deployment profile.
    pub profile: String,

    /// Deployment profiles available to select from.
    pub profiles: Vec<ProfileConfig>,

    /// Where the built app is served from.
    pub static_files: StaticConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            profile: "hash".to_string(),
            profiles: vec![ProfileConfig::hash(), ProfileConfig::history()],
            static_files: StaticConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl DevServerConfig {
    /// The profile named by `profile`, if declared.
    pub fn active_profile(&self) -> Option<&ProfileConfig> {
        self.profile_named(&self.profile)
    }

    pub fn profile_named(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:5173").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5173".to_string(),
        }
    }
}

/// A deployment profile: one history strategy, route table and proxy map.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileConfig {
    /// Profile identifier used for selection and logging.
    pub name: String,

    /// Base path the app is mounted under.
    #[serde(default = "default_base")]
    pub base: String,

    /// History strategy ("hash" or "web").
    #[serde(default)]
    pub history: HistoryKind,

    /// Route table, in declared order.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,

    /// Dev proxy rules, in declared order.
    #[serde(default)]
    pub proxy: Vec<ProxyRuleConfig>,
}

fn default_base() -> String {
    DEFAULT_BASE.to_string()
}

impl ProfileConfig {
    /// Home and Logs pages behind hash history; API calls under `/runner/api`.
    pub fn hash() -> Self {
        Self {
            name: "hash".to_string(),
            base: default_base(),
            history: HistoryKind::Hash,
            routes: vec![
                RouteConfig::new("/", "Home"),
                RouteConfig::new("/deployment/:id/logs/:logType", "Logs"),
            ],
            proxy: vec![ProxyRuleConfig::new("/runner/api", DEFAULT_BACKEND)],
        }
    }

    /// Dashboard, App and Logs pages behind web history; everything under
    /// `/runner` goes to the backend.
    pub fn history() -> Self {
        Self {
            name: "history".to_string(),
            base: default_base(),
            history: HistoryKind::Web,
            routes: vec![
                RouteConfig::new("/", "Dashboard"),
                RouteConfig::new("/app/:id", "AppPage"),
                RouteConfig::new("/deployment/:id/logs/:logType", "Logs"),
            ],
            proxy: vec![ProxyRuleConfig::new("/runner", DEFAULT_BACKEND)],
        }
    }
}

/// Route entry binding a path pattern to a page component.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path pattern, e.g. "/app/:id".
    pub path: String,

    /// Page component identifier.
    pub component: String,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            component: component.into(),
        }
    }
}

/// Dev proxy rule forwarding a path prefix to a backend origin.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProxyRuleConfig {
    /// Request path prefix to match.
    pub prefix: String,

    /// Backend origin (e.g., "http://127.0.0.1:1337").
    pub target: String,

    /// Remove the prefix from the forwarded path.
    #[serde(default)]
    pub strip_prefix: bool,

    /// Rewrite the Host header to the target authority.
    #[serde(default)]
    pub change_origin: bool,

    /// Add X-Forwarded-For/Host/Proto headers.
    #[serde(default)]
    pub xfwd: bool,
}

impl ProxyRuleConfig {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
            strip_prefix: false,
            change_origin: false,
            xfwd: false,
        }
    }
}

/// Static file serving for the built app.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory holding the built app.
    pub dist_dir: String,

    /// Document served for app routes.
    pub index_file: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            dist_dir: "www/dist".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Backend connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed for the backend to start responding, in seconds.
    pub upstream_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
            request_secs: 60,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let config = DevServerConfig::default();
        assert_eq!(config.profile, "hash");

        let hash = config.active_profile().unwrap();
        assert_eq!(hash.history, HistoryKind::Hash);
        assert_eq!(hash.proxy[0].prefix, "/runner/api");

        let history = config.profile_named("history").unwrap();
        assert_eq!(history.history, HistoryKind::Web);
        assert_eq!(history.base, "/runner");
        assert_eq!(history.proxy[0].target, "http://127.0.0.1:1337");
        assert!(!history.proxy[0].strip_prefix);
    }

    #[test]
    fn test_unknown_profile() {
        let config = DevServerConfig {
            profile: "staging".into(),
            ..Default::default()
        };
        assert!(config.active_profile().is_none());
    }
}
