/*
 * Responsibility
 * - GET /session: 現在の session user を返す (client 側の表示用)
 * - session なし → 401, resolver 障害 → 503
 */
use axum::{Json, extract::State, http::HeaderMap};

use crate::api::v1::dto::session::SessionResponse;
use crate::error::AppError;
use crate::state::AppState;

pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .sessions
        .resolve(&headers)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(session.into()))
}
