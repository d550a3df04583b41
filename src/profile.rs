//! Deployment profiles.
//!
//! A profile pairs one history strategy with its route table and proxy map.
//! The hash and history profiles are alternative deployments of the same UI;
//! exactly one is active per server.

use std::sync::Arc;

use thiserror::Error;

use crate::config::{DevServerConfig, ProfileConfig};
use crate::proxy::{ProxyError, ProxyTable};
use crate::routing::{HistoryMode, Navigator, RouteTable, RoutingError};

/// Errors raised while building the active profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("unknown deployment profile `{0}`")]
    Unknown(String),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Proxy(#[from] ProxyError),
}

/// Compiled, immutable form of a `ProfileConfig`.
#[derive(Debug, Clone)]
pub struct DeploymentProfile {
    name: String,
    history: HistoryMode,
    routes: Arc<RouteTable>,
    proxy: Arc<ProxyTable>,
}

impl DeploymentProfile {
    pub fn from_config(config: &ProfileConfig) -> Result<Self, ProfileError> {
        Ok(Self {
            name: config.name.clone(),
            history: HistoryMode::new(config.history, &config.base),
            routes: Arc::new(RouteTable::from_config(&config.routes)?),
            proxy: Arc::new(ProxyTable::from_config(&config.proxy)?),
        })
    }

    /// Build the profile selected by `config.profile`.
    pub fn active(config: &DevServerConfig) -> Result<Self, ProfileError> {
        let profile = config
            .active_profile()
            .ok_or_else(|| ProfileError::Unknown(config.profile.clone()))?;
        Self::from_config(profile)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn history(&self) -> &HistoryMode {
        &self.history
    }

    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.routes
    }

    pub fn proxy(&self) -> &Arc<ProxyTable> {
        &self.proxy
    }

    /// A fresh navigator over this profile's table.
    pub fn navigator(&self) -> Navigator {
        Navigator::new(Arc::clone(&self.routes), self.history.clone())
    }
}
