//! HTTP resolver: asks the identity provider's `get-session` endpoint.
//!
//! Only the `Cookie` header is forwarded. Timeouts are whatever the shared
//! `reqwest::Client` was built with.

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::session::resolver::{ResolverError, SessionResolver};
use crate::session::{Session, SessionUser};

const GET_SESSION_PATH: &str = "/api/auth/get-session";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderSessionRecord {
    id: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ProviderSessionBody {
    session: ProviderSessionRecord,
    user: SessionUser,
}

#[derive(Clone, Debug)]
pub struct ProviderSessionResolver {
    http: reqwest::Client,
    endpoint: Url,
}

impl ProviderSessionResolver {
    pub fn new(http: reqwest::Client, base_url: &Url) -> Result<Self, url::ParseError> {
        let endpoint = base_url.join(GET_SESSION_PATH)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Map the provider's answer onto resolver semantics.
///
/// - 2xx with `null` body: no session
/// - 401: no session
/// - anything else non-2xx, or an undecodable body: failure
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Option<Session>, ResolverError> {
    if status == 401 {
        return Ok(None);
    }
    if !(200..300).contains(&status) {
        return Err(ResolverError::UpstreamStatus { status });
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let parsed: Option<ProviderSessionBody> = serde_json::from_slice(body)
        .map_err(|e| ResolverError::InvalidResponse(e.to_string()))?;

    Ok(parsed.map(|b| Session {
        id: b.session.id,
        expires_at: b.session.expires_at,
        user: b.user,
    }))
}

#[async_trait]
impl SessionResolver for ProviderSessionResolver {
    fn backend_name(&self) -> &'static str {
        "provider"
    }

    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, ResolverError> {
        // no cookie, nothing to ask about
        let Some(cookie) = headers.get(header::COOKIE) else {
            return Ok(None);
        };

        let res = self
            .http
            .get(self.endpoint.clone())
            .header(header::COOKIE, cookie.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ResolverError::Unreachable(e.to_string()))?;

        let status = res.status().as_u16();
        let body = res
            .bytes()
            .await
            .map_err(|e| ResolverError::Unreachable(e.to_string()))?;

        interpret_response(status, &body)
    }
}
