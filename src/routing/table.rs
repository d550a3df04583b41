//! Route lookup.
//!
//! # Responsibilities
//! - Store route entries in declared order
//! - Resolve a router path to a component and its parameters
//! - Report entries that can match the same path
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) linear scan, first match wins (tables are small)
//! - Explicit `None` for not-found rather than a silent default

use std::fmt;

use serde::Serialize;

use super::pattern::{Params, RoutePattern};
use super::RoutingError;
use crate::config::RouteConfig;

/// Identifier of a page component mounted for a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pattern bound to a page component.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pattern: RoutePattern,
    component: ComponentId,
}

impl RouteEntry {
    pub fn new(pattern: &str, component: impl Into<ComponentId>) -> Result<Self, RoutingError> {
        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            component: component.into(),
        })
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn component(&self) -> &ComponentId {
        &self.component
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    pub component: ComponentId,
    pub params: Params,
    pub pattern: String,
    pub path: String,
}

/// Ordered, immutable set of route entries.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table from already-parsed entries, keeping their order.
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Build a table from configuration, rejecting ambiguous entries.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, RoutingError> {
        let entries = routes
            .iter()
            .map(|r| RouteEntry::new(&r.path, r.component.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let table = Self::new(entries);

        if let Some((first, second)) = table.ambiguities().into_iter().next() {
            return Err(RoutingError::Ambiguous {
                first: table.entries[first].pattern.to_string(),
                second: table.entries[second].pattern.to_string(),
            });
        }

        Ok(table)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a router path. Any query string or fragment is ignored.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let path = path.split(['?', '#']).next().unwrap_or_default();

        self.entries.iter().find_map(|entry| {
            entry.pattern.match_path(path).map(|params| ResolvedRoute {
                component: entry.component.clone(),
                params,
                pattern: entry.pattern.to_string(),
                path: path.to_string(),
            })
        })
    }

    /// Index pairs `(earlier, later)` of entries whose patterns overlap.
    pub fn ambiguities(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.entries.iter().enumerate() {
            for (j, b) in self.entries.iter().enumerate().skip(i + 1) {
                if a.pattern.overlaps(&b.pattern) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}
