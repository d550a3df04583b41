//! Navigation state: the route currently mounted.
//!
//! A `Navigator` owns exactly one current navigation. Every navigation event
//! resolves fully before the result is published with a single atomic swap,
//! so readers never observe a partially matched route.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::Serialize;

use super::history::HistoryMode;
use super::table::{ComponentId, ResolvedRoute, RouteTable};
use crate::observability::metrics;

/// What caused a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTrigger {
    /// First resolution when the app is loaded.
    InitialLoad,
    /// Programmatic navigation or a followed link.
    Push,
    /// Browser back/forward.
    Pop,
}

/// Outcome of one navigation event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navigation {
    pub trigger: NavigationTrigger,
    pub url: String,
    /// Router path derived from `url`, absent when the URL is outside the base.
    pub location: Option<String>,
    /// Matched route, absent for not-found.
    pub resolved: Option<ResolvedRoute>,
}

impl Navigation {
    pub fn is_not_found(&self) -> bool {
        self.resolved.is_none()
    }

    pub fn component(&self) -> Option<&ComponentId> {
        self.resolved.as_ref().map(|r| &r.component)
    }
}

/// Resolves navigation events against one route table.
pub struct Navigator {
    table: Arc<RouteTable>,
    history: HistoryMode,
    current: ArcSwapOption<Navigation>,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>, history: HistoryMode) -> Self {
        Self {
            table,
            history,
            current: ArcSwapOption::empty(),
        }
    }

    /// Handle a navigation to a browser URL and make it current.
    pub fn navigate(&self, trigger: NavigationTrigger, url: &str) -> Arc<Navigation> {
        let location = self.history.location(url);
        let resolved = location.as_deref().and_then(|path| self.table.resolve(path));

        match &resolved {
            Some(route) => {
                tracing::debug!(
                    ?trigger,
                    url = %url,
                    component = %route.component,
                    params = ?route.params,
                    "Route resolved"
                );
                metrics::record_navigation(route.component.as_str());
            }
            None => {
                tracing::warn!(?trigger, url = %url, location = ?location, "No route matched");
                metrics::record_navigation("not_found");
            }
        }

        let navigation = Arc::new(Navigation {
            trigger,
            url: url.to_string(),
            location,
            resolved,
        });
        self.current.store(Some(Arc::clone(&navigation)));
        navigation
    }

    /// Programmatic navigation to a router path.
    pub fn push(&self, path: &str) -> Arc<Navigation> {
        let href = self.history.href(path);
        self.navigate(NavigationTrigger::Push, &href)
    }

    /// The last navigation, if any happened yet.
    pub fn current(&self) -> Option<Arc<Navigation>> {
        self.current.load_full()
    }

    pub fn history(&self) -> &HistoryMode {
        &self.history
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::history::HistoryKind;
    use crate::routing::table::RouteEntry;

    fn navigator(kind: HistoryKind) -> Navigator {
        let table = RouteTable::new(vec![
            RouteEntry::new("/", "Home").unwrap(),
            RouteEntry::new("/deployment/:id/logs/:logType", "Logs").unwrap(),
        ]);
        Navigator::new(Arc::new(table), HistoryMode::new(kind, "/runner"))
    }

    #[test]
    fn test_no_navigation_before_first_event() {
        assert!(navigator(HistoryKind::Hash).current().is_none());
    }

    #[test]
    fn test_initial_load_resolves_root() {
        let nav = navigator(HistoryKind::Hash);
        let first = nav.navigate(NavigationTrigger::InitialLoad, "/runner/");
        assert_eq!(first.component().map(ComponentId::as_str), Some("Home"));
        assert_eq!(nav.current().unwrap(), first);
    }

    #[test]
    fn test_navigation_replaces_current() {
        let nav = navigator(HistoryKind::Hash);
        nav.navigate(NavigationTrigger::InitialLoad, "/runner/");
        let logs = nav.navigate(NavigationTrigger::Push, "/runner/#/deployment/9/logs/build");

        let current = nav.current().unwrap();
        assert!(Arc::ptr_eq(&current, &logs));
        let resolved = current.resolved.as_ref().unwrap();
        assert_eq!(resolved.params.get("id"), Some("9"));
        assert_eq!(resolved.params.get("logType"), Some("build"));
    }

    #[test]
    fn test_not_found_is_current_too() {
        let nav = navigator(HistoryKind::Web);
        nav.navigate(NavigationTrigger::InitialLoad, "/runner/");
        let missing = nav.navigate(NavigationTrigger::Pop, "/runner/nowhere");
        assert!(missing.is_not_found());
        assert_eq!(missing.location.as_deref(), Some("/nowhere"));
        assert!(nav.current().unwrap().is_not_found());
    }

    #[test]
    fn test_outside_base_has_no_location() {
        let nav = navigator(HistoryKind::Web);
        let outside = nav.navigate(NavigationTrigger::InitialLoad, "/elsewhere");
        assert!(outside.location.is_none());
        assert!(outside.is_not_found());
    }

    #[test]
    fn test_doubled_slash_below_base_is_not_root() {
        let nav = navigator(HistoryKind::Web);
        let doubled = nav.navigate(NavigationTrigger::InitialLoad, "/runner//");
        assert_eq!(doubled.location.as_deref(), Some("//"));
        assert!(doubled.is_not_found());
    }

    #[test]
    fn test_push_uses_history_href() {
        for kind in [HistoryKind::Hash, HistoryKind::Web] {
            let nav = navigator(kind);
            let pushed = nav.push("/deployment/1/logs/requests");
            assert_eq!(pushed.trigger, NavigationTrigger::Push);
            assert_eq!(pushed.component().map(ComponentId::as_str), Some("Logs"));
        }
    }
}
