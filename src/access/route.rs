//! Route classification.
//!
//! Every request path falls into exactly one of three classes. The table of
//! known routes is enumerated here; anything not listed is public.

use std::str::FromStr;

/// Where the sign-in / sign-up page lives.
pub const AUTH_ENTRY: &str = "/auth";
/// Where signed-in users land.
pub const PROTECTED_HOME: &str = "/dashboard";

const PROTECTED_ROUTES: &[&str] = &["/dashboard", "/settings", "/welcome"];
const AUTH_ONLY_ROUTES: &[&str] = &["/auth"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    /// Requires a session.
    Protected,
    /// Only for visitors without a session (sign-in/up).
    AuthOnly,
}

/// How a path is matched against the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Exact path or `entry/...` below it.
    #[default]
    Segment,
    /// Marker appears anywhere in the request target, query included.
    ///
    /// Matches the legacy behavior, including accidental hits such as
    /// `/user/auth-history` or `/?next=/dashboard`.
    Substring,
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "segment" | "prefix" => Ok(Self::Segment),
            "substring" | "legacy" => Ok(Self::Substring),
            other => Err(format!("unknown route match policy: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    protected: Vec<String>,
    auth_only: Vec<String>,
    policy: MatchPolicy,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(MatchPolicy::default())
    }
}

impl RouteTable {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            protected: PROTECTED_ROUTES.iter().map(|s| s.to_string()).collect(),
            auth_only: AUTH_ONLY_ROUTES.iter().map(|s| s.to_string()).collect(),
            policy,
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Classify a request target (path, optionally with `?query`).
    ///
    /// `Segment` ignores query and fragment. `Substring` looks at the query
    /// too.
    ///
    /// Protected wins over AuthOnly when both match, so a session is never
    /// required to *leave* a page it is also required to *see*.
    pub fn classify(&self, target: &str) -> RouteClass {
        let path = match self.policy {
            MatchPolicy::Segment => strip_query(target),
            MatchPolicy::Substring => strip_fragment(target),
        };

        if self.protected.iter().any(|r| self.matches(path, r)) {
            RouteClass::Protected
        } else if self.auth_only.iter().any(|r| self.matches(path, r)) {
            RouteClass::AuthOnly
        } else {
            RouteClass::Public
        }
    }

    fn matches(&self, path: &str, route: &str) -> bool {
        match self.policy {
            MatchPolicy::Segment => {
                let path = if path.len() > 1 {
                    path.trim_end_matches('/')
                } else {
                    path
                };
                path == route
                    || path
                        .strip_prefix(route)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            MatchPolicy::Substring => path.contains(route),
        }
    }
}

fn strip_query(target: &str) -> &str {
    target.split(['?', '#']).next().unwrap_or(target)
}

fn strip_fragment(target: &str) -> &str {
    target.split('#').next().unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_routes_classify_the_same_under_both_policies() {
        for policy in [MatchPolicy::Segment, MatchPolicy::Substring] {
            let table = RouteTable::new(policy);
            assert_eq!(table.classify("/dashboard"), RouteClass::Protected);
            assert_eq!(table.classify("/settings"), RouteClass::Protected);
            assert_eq!(table.classify("/welcome"), RouteClass::Protected);
            assert_eq!(table.classify("/auth"), RouteClass::AuthOnly);
            assert_eq!(table.classify("/"), RouteClass::Public);
            assert_eq!(table.classify("/pricing"), RouteClass::Public);
        }
    }

    #[test]
    fn segment_policy_matches_nested_paths() {
        let table = RouteTable::new(MatchPolicy::Segment);
        assert_eq!(table.classify("/dashboard/projects/1"), RouteClass::Protected);
        assert_eq!(table.classify("/dashboard/"), RouteClass::Protected);
        assert_eq!(table.classify("/auth/callback"), RouteClass::AuthOnly);
    }

    #[test]
    fn segment_policy_rejects_lookalike_paths() {
        let table = RouteTable::new(MatchPolicy::Segment);
        assert_eq!(table.classify("/user/auth-history"), RouteClass::Public);
        assert_eq!(table.classify("/authors"), RouteClass::Public);
        assert_eq!(table.classify("/dashboards"), RouteClass::Public);
        assert_eq!(table.classify("/api/auth/get-session"), RouteClass::Public);
    }

    #[test]
    fn substring_policy_keeps_legacy_matches() {
        let table = RouteTable::new(MatchPolicy::Substring);
        assert_eq!(table.classify("/user/auth-history"), RouteClass::AuthOnly);
        assert_eq!(table.classify("/old/dashboard-export"), RouteClass::Protected);
    }

    #[test]
    fn query_string_is_ignored() {
        let table = RouteTable::default();
        assert_eq!(table.classify("/dashboard?tab=1"), RouteClass::Protected);
        assert_eq!(table.classify("/?next=/dashboard"), RouteClass::Public);
        assert_eq!(table.classify("/home#auth"), RouteClass::Public);
    }

    #[test]
    fn substring_policy_sees_the_query() {
        let table = RouteTable::new(MatchPolicy::Substring);
        assert_eq!(table.classify("/?next=/dashboard"), RouteClass::Protected);
        assert_eq!(table.classify("/pricing?from=/auth"), RouteClass::AuthOnly);
        assert_eq!(table.classify("/dashboard?tab=1"), RouteClass::Protected);
        assert_eq!(table.classify("/home#auth"), RouteClass::Public);
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("segment".parse::<MatchPolicy>(), Ok(MatchPolicy::Segment));
        assert_eq!("Legacy".parse::<MatchPolicy>(), Ok(MatchPolicy::Substring));
        assert!("exact".parse::<MatchPolicy>().is_err());
    }
}
