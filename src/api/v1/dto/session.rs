/*
 * Responsibility
 * - GET /session の response DTO
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::session::{Session, SessionUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(s: Session) -> Self {
        Self {
            user: s.user,
            expires_at: s.expires_at,
        }
    }
}
