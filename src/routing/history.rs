//! History strategies: how navigable state is carried in the browser URL.
//!
//! # Responsibilities
//! - Convert a browser URL into the router path the table resolves
//! - Build the URL that represents a router path
//!
//! # Design Decisions
//! - Hash history reads the fragment; the request path is only the document
//! - Web history strips a fixed base; paths outside the base are not ours
//! - Base is normalized without a trailing slash (`/` becomes empty)

use serde::{Deserialize, Serialize};

/// History strategy as named in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    /// Router path lives after `#`.
    #[default]
    Hash,
    /// Router path is the real request path below the base.
    Web,
}

/// A history strategy bound to a base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMode {
    Hash { base: String },
    Web { base: String },
}

impl HistoryMode {
    pub fn new(kind: HistoryKind, base: &str) -> Self {
        let base = normalize_base(base);
        match kind {
            HistoryKind::Hash => Self::Hash { base },
            HistoryKind::Web => Self::Web { base },
        }
    }

    pub fn kind(&self) -> HistoryKind {
        match self {
            Self::Hash { .. } => HistoryKind::Hash,
            Self::Web { .. } => HistoryKind::Web,
        }
    }

    /// Normalized base path, empty when mounted at the root.
    pub fn base(&self) -> &str {
        match self {
            Self::Hash { base } | Self::Web { base } => base,
        }
    }

    /// Router path for a browser URL.
    ///
    /// Accepts an absolute URL (`http://host/runner/#/app/7`) or an
    /// origin-relative one (`/runner/app/7?x=1`). Returns `None` when a web
    /// history URL falls outside the base.
    pub fn location(&self, url: &str) -> Option<String> {
        let (path, fragment) = split_url(url);
        match self {
            Self::Hash { .. } => {
                let route = fragment
                    .map(|f| f.split('?').next().unwrap_or_default())
                    .unwrap_or_default();
                Some(match route {
                    "" => "/".to_string(),
                    r if r.starts_with('/') => r.to_string(),
                    r => format!("/{r}"),
                })
            }
            Self::Web { base } => strip_base(base, path).map(str::to_string),
        }
    }

    /// URL representing `path` under this strategy.
    pub fn href(&self, path: &str) -> String {
        match self {
            Self::Hash { base } => format!("{base}/#{path}"),
            Self::Web { base } => format!("{base}{path}"),
        }
    }
}

/// Path below `base`, or `None` when `path` is outside it.
///
/// The remainder must start at a segment boundary, so `/runnerx` is outside
/// `/runner`. An exact match yields `/`.
pub fn strip_base<'a>(base: &str, path: &'a str) -> Option<&'a str> {
    match path.strip_prefix(base)? {
        "" => Some("/"),
        rest if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Split a URL into its path (query removed) and optional fragment.
fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = match url.find("://") {
        Some(idx) => {
            let after_scheme = &url[idx + 3..];
            match after_scheme.find(['/', '?', '#']) {
                Some(start) => &after_scheme[start..],
                None => "",
            }
        }
        None => url,
    };

    let (before_fragment, fragment) = match url.split_once('#') {
        Some((before, fragment)) => (before, Some(fragment)),
        None => (url, None),
    };
    let path = before_fragment.split('?').next().unwrap_or_default();
    let path = if path.is_empty() { "/" } else { path };
    (path, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_normalization() {
        assert_eq!(HistoryMode::new(HistoryKind::Web, "/runner/").base(), "/runner");
        assert_eq!(HistoryMode::new(HistoryKind::Web, "runner").base(), "/runner");
        assert_eq!(HistoryMode::new(HistoryKind::Hash, "/").base(), "");
    }

    #[test]
    fn test_hash_location() {
        let hash = HistoryMode::new(HistoryKind::Hash, "/runner");
        assert_eq!(hash.location("/runner/").as_deref(), Some("/"));
        assert_eq!(hash.location("/runner/#").as_deref(), Some("/"));
        assert_eq!(
            hash.location("http://localhost:5173/runner/#/deployment/1/logs/build").as_deref(),
            Some("/deployment/1/logs/build")
        );
        assert_eq!(hash.location("/runner/#/app/7?tab=env").as_deref(), Some("/app/7"));
        assert_eq!(hash.location("/runner/#app/7").as_deref(), Some("/app/7"));
    }

    #[test]
    fn test_web_location() {
        let web = HistoryMode::new(HistoryKind::Web, "/runner");
        assert_eq!(web.location("/runner").as_deref(), Some("/"));
        assert_eq!(web.location("/runner/").as_deref(), Some("/"));
        assert_eq!(web.location("/runner/app/7?x=1#frag").as_deref(), Some("/app/7"));
        assert_eq!(
            web.location("http://localhost/runner/deployment/3/logs/running").as_deref(),
            Some("/deployment/3/logs/running")
        );
        assert_eq!(web.location("/other/app/7"), None);
        assert_eq!(web.location("/runnerx/app/7"), None);
        assert_eq!(web.location("http://localhost"), None);
    }

    #[test]
    fn test_web_location_at_root_base() {
        let web = HistoryMode::new(HistoryKind::Web, "/");
        assert_eq!(web.location("/app/7").as_deref(), Some("/app/7"));
        assert_eq!(web.location("http://localhost").as_deref(), Some("/"));
    }

    #[test]
    fn test_href() {
        let hash = HistoryMode::new(HistoryKind::Hash, "/runner");
        assert_eq!(hash.href("/app/7"), "/runner/#/app/7");

        let web = HistoryMode::new(HistoryKind::Web, "/runner");
        assert_eq!(web.href("/"), "/runner/");
        assert_eq!(web.href("/app/7"), "/runner/app/7");
    }

    #[test]
    fn test_href_round_trips_through_location() {
        for kind in [HistoryKind::Hash, HistoryKind::Web] {
            let mode = HistoryMode::new(kind, "/runner");
            for path in ["/", "/app/7", "/deployment/42/logs/stdout"] {
                assert_eq!(mode.location(&mode.href(path)).as_deref(), Some(path));
            }
        }
    }
}
