//! Proxy rules: which requests go to which backend origin.

use axum::http::uri::{Authority, Scheme};
use axum::http::Uri;
use url::Url;

use super::ProxyError;
use crate::config::ProxyRuleConfig;

/// Forward requests whose path starts with `prefix` to a backend origin.
#[derive(Debug, Clone)]
pub struct ProxyRule {
    prefix: String,
    target: String,
    authority: Authority,
    strip_prefix: bool,
    change_origin: bool,
    xfwd: bool,
}

impl ProxyRule {
    /// Create a transparent rule: prefix, Host header and forwarding headers
    /// are left as the client sent them.
    pub fn new(prefix: impl Into<String>, target: &str) -> Result<Self, ProxyError> {
        let prefix = prefix.into();
        if !prefix.starts_with('/') {
            return Err(ProxyError::InvalidPrefix(prefix));
        }

        Ok(Self {
            prefix,
            target: target.trim_end_matches('/').to_string(),
            authority: parse_target(target)?,
            strip_prefix: false,
            change_origin: false,
            xfwd: false,
        })
    }

    pub fn from_config(config: &ProxyRuleConfig) -> Result<Self, ProxyError> {
        Ok(Self::new(config.prefix.as_str(), &config.target)?
            .with_strip_prefix(config.strip_prefix)
            .with_change_origin(config.change_origin)
            .with_xfwd(config.xfwd))
    }

    pub fn with_strip_prefix(mut self, strip: bool) -> Self {
        self.strip_prefix = strip;
        self
    }

    pub fn with_change_origin(mut self, change: bool) -> Self {
        self.change_origin = change;
        self
    }

    pub fn with_xfwd(mut self, xfwd: bool) -> Self {
        self.xfwd = xfwd;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Backend origin as configured, without a trailing slash.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub fn strips_prefix(&self) -> bool {
        self.strip_prefix
    }

    pub fn changes_origin(&self) -> bool {
        self.change_origin
    }

    pub fn adds_forwarded(&self) -> bool {
        self.xfwd
    }

    /// Plain prefix test on the request path.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Point `uri` at the backend origin, keeping path and query intact
    /// (minus the prefix when `strip_prefix` is set).
    pub fn rewrite(&self, uri: &Uri) -> Result<Uri, ProxyError> {
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

        let forwarded = match path_and_query.strip_prefix(self.prefix.as_str()) {
            Some(rest) if self.strip_prefix => {
                if rest.starts_with('/') {
                    rest.to_string()
                } else {
                    format!("/{rest}")
                }
            }
            _ => path_and_query.to_string(),
        };

        Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(forwarded)
            .build()
            .map_err(|e| ProxyError::Rewrite(e.to_string()))
    }
}

/// Only plain-HTTP origins: the forwarder has no TLS connector.
fn parse_target(target: &str) -> Result<Authority, ProxyError> {
    let invalid = |reason: &str| ProxyError::InvalidTarget {
        target: target.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(target).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "http" {
        return Err(invalid("only http:// targets are supported"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("target must be an origin without path, query or fragment"));
    }
    let host = url.host_str().ok_or_else(|| invalid("missing host"))?;

    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    authority
        .parse::<Authority>()
        .map_err(|e| invalid(&e.to_string()))
}

/// Ordered set of proxy rules for one profile.
#[derive(Debug, Clone, Default)]
pub struct ProxyTable {
    rules: Vec<ProxyRule>,
}

impl ProxyTable {
    pub fn new(rules: Vec<ProxyRule>) -> Self {
        Self { rules }
    }

    pub fn from_config(rules: &[ProxyRuleConfig]) -> Result<Self, ProxyError> {
        rules
            .iter()
            .map(ProxyRule::from_config)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// First rule, in declared order, whose prefix `path` starts with.
    pub fn find(&self, path: &str) -> Option<&ProxyRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn rules(&self) -> &[ProxyRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
