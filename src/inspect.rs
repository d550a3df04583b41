//! Route inspection behind the `resolve` and `routes` commands.
//!
//! Both work on a compiled `DeploymentProfile` and return plain data or
//! text, leaving printing to the binary.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::profile::DeploymentProfile;
use crate::routing::{Navigation, NavigationTrigger};

/// Navigate `urls` in order: the first as the initial load, the rest as pushes.
pub fn resolve_urls<S: AsRef<str>>(
    profile: &DeploymentProfile,
    urls: &[S],
) -> Vec<Arc<Navigation>> {
    let navigator = profile.navigator();

    urls.iter()
        .enumerate()
        .map(|(i, url)| {
            let trigger = if i == 0 {
                NavigationTrigger::InitialLoad
            } else {
                NavigationTrigger::Push
            };
            navigator.navigate(trigger, url.as_ref())
        })
        .collect()
}

/// One JSON document per navigation.
pub fn navigation_lines(
    navigations: &[Arc<Navigation>],
) -> Result<Vec<String>, serde_json::Error> {
    navigations
        .iter()
        .map(|navigation| serde_json::to_string(navigation.as_ref()))
        .collect()
}

/// Human-readable listing of the profile's route and proxy tables.
pub fn route_listing(profile: &DeploymentProfile) -> String {
    let history = profile.history();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "profile {} ({:?} history, base \"{}\")",
        profile.name(),
        history.kind(),
        history.base()
    );
    for entry in profile.routes().entries() {
        let _ = writeln!(
            out,
            "  {:<40} {:<12} {}",
            entry.pattern().as_str(),
            entry.component().as_str(),
            history.href(entry.pattern().as_str())
        );
    }
    for rule in profile.proxy().rules() {
        let mode = if rule.strips_prefix() { "strip" } else { "keep" };
        let _ = writeln!(
            out,
            "  proxy {:<34} → {} ({mode} prefix)",
            rule.prefix(),
            rule.target()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DevServerConfig;
    use serde_json::json;

    fn profile(name: &str) -> DeploymentProfile {
        let mut config = DevServerConfig::default();
        config.profile = name.to_string();
        DeploymentProfile::active(&config).unwrap()
    }

    #[test]
    fn test_first_url_is_initial_load() {
        let navigations = resolve_urls(
            &profile("hash"),
            &["/runner/", "/runner/#/deployment/7/logs/build", "/runner/#/nowhere"],
        );

        let triggers: Vec<_> = navigations.iter().map(|n| n.trigger).collect();
        assert_eq!(
            triggers,
            vec![
                NavigationTrigger::InitialLoad,
                NavigationTrigger::Push,
                NavigationTrigger::Push
            ]
        );
        assert!(navigations[2].is_not_found());
    }

    #[test]
    fn test_navigation_json_shape() {
        let navigations = resolve_urls(
            &profile("history"),
            &["/runner/app/7?tab=env", "/elsewhere"],
        );
        let lines = navigation_lines(&navigations).unwrap();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(
            first,
            json!({
                "trigger": "initial_load",
                "url": "/runner/app/7?tab=env",
                "location": "/app/7",
                "resolved": {
                    "component": "AppPage",
                    "params": { "id": "7" },
                    "pattern": "/app/:id",
                    "path": "/app/7"
                }
            })
        );

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(
            second,
            json!({
                "trigger": "push",
                "url": "/elsewhere",
                "location": null,
                "resolved": null
            })
        );
    }

    #[test]
    fn test_route_listing() {
        let listing = route_listing(&profile("hash"));
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines[0], "profile hash (Hash history, base \"/runner\")");
        assert!(lines[1].contains("Home") && lines[1].ends_with("/runner/#/"));
        assert!(lines[2].contains("Logs"));
        assert!(lines[2].ends_with("/runner/#/deployment/:id/logs/:logType"));
        assert!(lines[3].contains("/runner/api"));
        assert!(lines[3].contains("http://127.0.0.1:1337 (keep prefix)"));
        assert_eq!(lines.len(), 4);
    }
}
