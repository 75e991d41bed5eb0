//! Allow / redirect decision for a (session, route) pair.
//!
//! The same gate runs at the edge (middleware) and again in the page layout.
//! Both call sites hold their own copy and resolve their own session; nothing
//! is shared between them.

use axum::response::Redirect;

use crate::access::route::{AUTH_ENTRY, MatchPolicy, PROTECTED_HOME, RouteClass, RouteTable};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(String),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// 307 to the target, or `None` when the request should proceed.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo(location) => Some(Redirect::temporary(location)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    routes: RouteTable,
    auth_entry: String,
    protected_home: String,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(RouteTable::default())
    }
}

impl AccessGate {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes,
            auth_entry: AUTH_ENTRY.to_string(),
            protected_home: PROTECTED_HOME.to_string(),
        }
    }

    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self::new(RouteTable::new(policy))
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        self.routes.classify(path)
    }

    pub fn auth_entry(&self) -> &str {
        &self.auth_entry
    }

    pub fn protected_home(&self) -> &str {
        &self.protected_home
    }

    /// | session | class     | decision               |
    /// |---------|-----------|------------------------|
    /// | no      | Protected | redirect to auth entry |
    /// | yes     | AuthOnly  | redirect to home       |
    /// | *       | *         | allow                  |
    pub fn decide(&self, session: Option<&Session>, class: RouteClass) -> Decision {
        match (session.is_some(), class) {
            (false, RouteClass::Protected) => Decision::RedirectTo(self.auth_entry.clone()),
            (true, RouteClass::AuthOnly) => Decision::RedirectTo(self.protected_home.clone()),
            _ => Decision::Allow,
        }
    }

    pub fn evaluate(&self, path: &str, session: Option<&Session>) -> Decision {
        self.decide(session, self.classify(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::session_for;

    const PATHS: &[&str] = &[
        "/",
        "/auth",
        "/auth/reset",
        "/dashboard",
        "/dashboard/projects",
        "/settings",
        "/welcome",
        "/pricing",
        "/user/auth-history",
    ];

    #[test]
    fn dashboard_without_session_redirects_to_auth() {
        let gate = AccessGate::default();
        assert_eq!(
            gate.evaluate("/dashboard", None),
            Decision::RedirectTo("/auth".into())
        );
    }

    #[test]
    fn auth_with_session_redirects_to_dashboard() {
        let gate = AccessGate::default();
        let session = session_for("ada@example.com");
        assert_eq!(
            gate.evaluate("/auth", Some(&session)),
            Decision::RedirectTo("/dashboard".into())
        );
    }

    #[test]
    fn welcome_without_session_redirects_to_auth() {
        let gate = AccessGate::default();
        assert_eq!(
            gate.evaluate("/welcome", None),
            Decision::RedirectTo("/auth".into())
        );
    }

    #[test]
    fn root_is_always_allowed() {
        let gate = AccessGate::default();
        let session = session_for("ada@example.com");
        assert_eq!(gate.evaluate("/", None), Decision::Allow);
        assert_eq!(gate.evaluate("/", Some(&session)), Decision::Allow);
    }

    #[test]
    fn decision_table() {
        let gate = AccessGate::default();
        let s = session_for("ada@example.com");

        assert!(!gate.decide(None, RouteClass::Protected).is_allow());
        assert!(gate.decide(Some(&s), RouteClass::Protected).is_allow());
        assert!(gate.decide(None, RouteClass::AuthOnly).is_allow());
        assert!(!gate.decide(Some(&s), RouteClass::AuthOnly).is_allow());
        assert!(gate.decide(None, RouteClass::Public).is_allow());
        assert!(gate.decide(Some(&s), RouteClass::Public).is_allow());
    }

    #[test]
    fn edge_and_render_instances_agree() {
        let s = session_for("ada@example.com");
        for policy in [MatchPolicy::Segment, MatchPolicy::Substring] {
            let edge = AccessGate::with_policy(policy);
            let render = AccessGate::with_policy(policy);
            for path in PATHS {
                for session in [None, Some(&s)] {
                    assert_eq!(
                        edge.evaluate(path, session),
                        render.evaluate(path, session),
                        "disagreement on {path} ({policy:?}, session={})",
                        session.is_some()
                    );
                }
            }
        }
    }

    #[test]
    fn applying_twice_yields_same_decision() {
        let gate = AccessGate::default();
        let s = session_for("ada@example.com");
        for path in PATHS {
            for session in [None, Some(&s)] {
                let first = gate.evaluate(path, session);
                let second = gate.evaluate(path, session);
                assert_eq!(first, second, "{path}");
            }
        }
    }

    #[test]
    fn redirect_decision_becomes_temporary_redirect() {
        use axum::response::IntoResponse;

        let res = Decision::RedirectTo("/auth".into())
            .redirect()
            .unwrap()
            .into_response();
        assert_eq!(res.status(), axum::http::StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(res.headers()["location"], "/auth");
    }

    #[test]
    fn allow_has_no_response() {
        assert!(Decision::Allow.redirect().is_none());
    }
}
