//! Route pattern parsing and matching.
//!
//! # Responsibilities
//! - Parse patterns such as `/deployment/:id/logs/:logType`
//! - Match a router path segment by segment
//! - Extract named parameters
//! - Detect pairs of patterns that can match the same path
//!
//! # Design Decisions
//! - Literal segments are case-sensitive
//! - Parameter segments match any non-empty segment, values kept verbatim
//! - A single trailing slash on the incoming path is ignored
//! - No regex to guarantee O(segments) matching

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::RoutingError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Parameters extracted from a matched path, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value bound to `name`, if the matched pattern declares it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A compiled path pattern made of literal and `:name` segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern. The root pattern `/` has no segments.
    pub fn parse(raw: &str) -> Result<Self, RoutingError> {
        let invalid = |reason| RoutingError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        let rest = raw.strip_prefix('/').ok_or_else(|| invalid("must start with '/'"))?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(invalid("empty path segment"));
                }
                match part.strip_prefix(':') {
                    Some("") => return Err(invalid("parameter without a name")),
                    Some(name) => {
                        let duplicate = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                        if duplicate {
                            return Err(invalid("duplicate parameter name"));
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Literal(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as written in the route table.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the parameters declared by this pattern, in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a router path (no query, no fragment) and extract parameters.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        // Only a single trailing slash after a non-empty segment is dropped
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() && !trimmed.ends_with('/') => trimmed,
            _ => path,
        };
        let rest = path.strip_prefix('/')?;

        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => params.insert(name, part),
            }
        }
        Some(params)
    }

    /// True when at least one path would match both patterns.
    pub fn overlaps(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pattern() {
        let root = RoutePattern::parse("/").unwrap();
        assert_eq!(root.match_path("/"), Some(Params::new()));
        assert!(root.match_path("/app").is_none());
        assert!(root.match_path("").is_none());
    }

    #[test]
    fn test_param_extraction() {
        let logs = RoutePattern::parse("/deployment/:id/logs/:logType").unwrap();
        let params = logs.match_path("/deployment/42/logs/stdout").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("logType"), Some("stdout"));
        assert_eq!(params.len(), 2);

        assert_eq!(logs.param_names().collect::<Vec<_>>(), vec!["id", "logType"]);
    }

    #[test]
    fn test_literal_segments_are_exact() {
        let app = RoutePattern::parse("/app/:id").unwrap();
        assert!(app.match_path("/App/7").is_none()); // Case sensitive
        assert!(app.match_path("/apps/7").is_none());
        assert!(app.match_path("/app").is_none());
        assert!(app.match_path("/app/7/extra").is_none());
    }

    #[test]
    fn test_empty_param_never_matches() {
        let logs = RoutePattern::parse("/deployment/:id/logs/:logType").unwrap();
        assert!(logs.match_path("/deployment//logs/build").is_none());
    }

    #[test]
    fn test_trailing_slash_ignored() {
        let app = RoutePattern::parse("/app/:id").unwrap();
        let params = app.match_path("/app/7/").unwrap();
        assert_eq!(params.get("id"), Some("7"));
    }

    #[test]
    fn test_repeated_trailing_slash_never_matches() {
        let root = RoutePattern::parse("/").unwrap();
        assert!(root.match_path("//").is_none());

        let app = RoutePattern::parse("/app/:id").unwrap();
        assert!(app.match_path("/app/7//").is_none());
        assert!(app.match_path("/app//").is_none());
    }

    #[test]
    fn test_param_values_kept_verbatim() {
        let app = RoutePattern::parse("/app/:id").unwrap();
        let params = app.match_path("/app/a%20b").unwrap();
        assert_eq!(params.get("id"), Some("a%20b"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            RoutePattern::parse("app/:id"),
            Err(RoutingError::InvalidPattern { reason: "must start with '/'", .. })
        ));
        assert!(RoutePattern::parse("/app//:id").is_err());
        assert!(RoutePattern::parse("/app/").is_err());
        assert!(RoutePattern::parse("/app/:").is_err());
        assert!(RoutePattern::parse("/a/:id/b/:id").is_err());
    }

    #[test]
    fn test_overlap_detection() {
        let app = RoutePattern::parse("/app/:id").unwrap();
        let app_new = RoutePattern::parse("/app/new").unwrap();
        let logs = RoutePattern::parse("/deployment/:id/logs/:logType").unwrap();
        let root = RoutePattern::parse("/").unwrap();

        assert!(app.overlaps(&app_new));
        assert!(!app.overlaps(&logs));
        assert!(!root.overlaps(&app));
        assert!(root.overlaps(&root));
    }
}
