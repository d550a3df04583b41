//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (active profile exists, names unique)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Reject route tables with patterns that can match the same path
//! - Reject proxy targets the forwarder cannot reach
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DevServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::{DevServerConfig, ProfileConfig};
use crate::proxy::ProxyRule;
use crate::routing::{RouteEntry, RouteTable, RoutingError};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    UnknownProfile(String),
    DuplicateProfile(String),
    InvalidBase { profile: String, base: String },
    Route { profile: String, error: RoutingError },
    Proxy { profile: String, message: String },
    ZeroTimeout(&'static str),
    EmptyIndexFile,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address `{}`", addr)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "invalid metrics address `{}`", addr)
            }
            ValidationError::UnknownProfile(name) => write!(f, "unknown profile `{}`", name),
            ValidationError::DuplicateProfile(name) => {
                write!(f, "profile `{}` declared more than once", name)
            }
            ValidationError::InvalidBase { profile, base } => {
                write!(f, "profile `{}`: invalid base path `{}`", profile, base)
            }
            ValidationError::Route { profile, error } => {
                write!(f, "profile `{}`: {}", profile, error)
            }
            ValidationError::Proxy { profile, message } => {
                write!(f, "profile `{}`: {}", profile, message)
            }
            ValidationError::ZeroTimeout(field) => write!(f, "timeouts.{} must be > 0", field),
            ValidationError::EmptyIndexFile => write!(f, "static_files.index_file is empty"),
        }
    }
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &DevServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.active_profile().is_none() {
        errors.push(ValidationError::UnknownProfile(config.profile.clone()));
    }

    let mut seen = HashSet::new();
    for profile in &config.profiles {
        if !seen.insert(profile.name.as_str()) {
            errors.push(ValidationError::DuplicateProfile(profile.name.clone()));
        }
        validate_profile(profile, &mut errors);
    }

    let timeouts = &config.timeouts;
    for (field, value) in [
        ("connect_secs", timeouts.connect_secs),
        ("upstream_secs", timeouts.upstream_secs),
        ("request_secs", timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    if config.static_files.index_file.trim().is_empty() {
        errors.push(ValidationError::EmptyIndexFile);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_profile(profile: &ProfileConfig, errors: &mut Vec<ValidationError>) {
    let base = profile.base.as_str();
    if !(base.is_empty() || base.starts_with('/')) || base.contains(['#', '?']) {
        errors.push(ValidationError::InvalidBase {
            profile: profile.name.clone(),
            base: base.to_string(),
        });
    }

    let mut entries = Vec::with_capacity(profile.routes.len());
    for route in &profile.routes {
        match RouteEntry::new(&route.path, route.component.as_str()) {
            Ok(entry) => entries.push(entry),
            Err(error) => errors.push(ValidationError::Route {
                profile: profile.name.clone(),
                error,
            }),
        }
    }

    let table = RouteTable::new(entries);
    for (first, second) in table.ambiguities() {
        errors.push(ValidationError::Route {
            profile: profile.name.clone(),
            error: RoutingError::Ambiguous {
                first: table.entries()[first].pattern().to_string(),
                second: table.entries()[second].pattern().to_string(),
            },
        });
    }

    for rule in &profile.proxy {
        if let Err(e) = ProxyRule::from_config(rule) {
            errors.push(ValidationError::Proxy {
                profile: profile.name.clone(),
                message: e.to_string(),
            });
        }
    }
}
