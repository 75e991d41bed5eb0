//! Session resolver interface.
//!
//! `Ok(None)` means "no session" and is a normal outcome. `Err` means the
//! identity source could not answer; callers must fail the request rather
//! than treat it as signed out.

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("identity provider unreachable: {0}")]
    Unreachable(String),
    #[error("identity provider returned {status}")]
    UpstreamStatus { status: u16 },
    #[error("identity provider response invalid: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Resolves the session attached to a request, if any.
///
/// Implementations hold no per-request state and are shared behind `Arc`.
#[async_trait]
pub trait SessionResolver: Send + Sync + 'static {
    /// Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    /// `Ok(None)` when the request carries no valid session. `Err` only when
    /// the identity source could not answer.
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, ResolverError>;
}

/// Extract the session token from the cookie header.
///
/// Accepts `<name>` and the `__Secure-<name>` variant set over HTTPS. The
/// cookie value is `<token>.<signature>`; only the token is returned.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    let secure_name = format!("__Secure-{cookie_name}");

    let raw = jar
        .get(&secure_name)
        .or_else(|| jar.get(cookie_name))
        .map(|c| c.value().trim().to_string())?;

    let token = raw.split('.').next().unwrap_or_default();
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::COOKIE};

    const NAME: &str = "better-auth.session_token";

    fn headers(cookie: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        h
    }

    #[test]
    fn strips_signature_suffix() {
        let h = headers("better-auth.session_token=abc123.c2lnbmF0dXJl; theme=dark");
        assert_eq!(session_token(&h, NAME).as_deref(), Some("abc123"));
    }

    #[test]
    fn accepts_unsigned_value() {
        let h = headers("better-auth.session_token=abc123");
        assert_eq!(session_token(&h, NAME).as_deref(), Some("abc123"));
    }

    #[test]
    fn prefers_secure_variant() {
        let h = headers("better-auth.session_token=plain; __Secure-better-auth.session_token=sec.sig");
        assert_eq!(session_token(&h, NAME).as_deref(), Some("sec"));
    }

    #[test]
    fn missing_or_blank_cookie_is_none() {
        assert_eq!(session_token(&HeaderMap::new(), NAME), None);
        assert_eq!(session_token(&headers("other=1"), NAME), None);
        assert_eq!(session_token(&headers("better-auth.session_token=.sig"), NAME), None);
        assert_eq!(session_token(&headers("better-auth.session_token="), NAME), None);
    }
}
