//! Database-backed resolver: reads the identity provider's tables directly.

use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::Utc;

use crate::repos::session_repo::SessionRepo;
use crate::session::resolver::{ResolverError, SessionResolver, session_token};
use crate::session::Session;

#[derive(Clone, Debug)]
pub struct DbSessionResolver {
    repo: SessionRepo,
    cookie_name: String,
}

impl DbSessionResolver {
    pub fn new(repo: SessionRepo, cookie_name: impl Into<String>) -> Self {
        Self {
            repo,
            cookie_name: cookie_name.into(),
        }
    }
}

#[async_trait]
impl SessionResolver for DbSessionResolver {
    fn backend_name(&self) -> &'static str {
        "database"
    }

    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, ResolverError> {
        let Some(token) = session_token(headers, &self.cookie_name) else {
            return Ok(None);
        };

        let row = self.repo.find_active_by_token(&token, Utc::now()).await?;
        Ok(row.map(Session::from))
    }
}
