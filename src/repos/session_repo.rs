/*
 * Responsibility
 * - identity provider が管理する "session" / "user" テーブルの read-only 参照
 * - 書き込み (作成・失効) は identity provider の責務なのでここでは行わない
 */
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::session::{Session, SessionUser};

#[derive(Debug, FromRow)]
pub struct ActiveSessionRow {
    #[sqlx(rename = "sessionId")]
    pub session_id: String,
    /// `TIMESTAMP(3)` without time zone, stored as UTC.
    #[sqlx(rename = "expiresAt")]
    pub expires_at: NaiveDateTime,

    #[sqlx(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[sqlx(rename = "emailVerified")]
    pub email_verified: bool,
    pub image: Option<String>,
}

impl From<ActiveSessionRow> for Session {
    fn from(row: ActiveSessionRow) -> Self {
        Session {
            id: row.session_id,
            expires_at: row.expires_at.and_utc(),
            user: SessionUser {
                id: row.user_id,
                name: row.name,
                email: row.email,
                email_verified: row.email_verified,
                image: row.image,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionRepo {
    pool: PgPool,
}

impl SessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Unexpired session for `token`, joined with its user.
    pub async fn find_active_by_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<ActiveSessionRow>> {
        let row = sqlx::query_as::<_, ActiveSessionRow>(
            r#"
            SELECT
                s."id" AS "sessionId",
                s."expiresAt",
                u."id" AS "userId",
                u."name",
                u."email",
                u."emailVerified",
                u."image"
            FROM "session" s
            JOIN "user" u ON u."id" = s."userId"
            WHERE s."token" = $1 AND s."expiresAt" > $2
            "#,
        )
        .bind(token)
        .bind(now.naive_utc())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(row)
    }
}
