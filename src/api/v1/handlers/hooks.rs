/*
 * Responsibility
 * - POST /hooks/verification-email
 *   identity provider が token / link を発行した後に呼ぶ。ここでは配送だけを行う
 * - x-hook-secret で呼び出し元を確認する
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use subtle::ConstantTimeEq;

use crate::api::v1::dto::hooks::VerificationEmailRequest;
use crate::error::AppError;
use crate::state::AppState;

pub const HOOK_SECRET_HEADER: &str = "x-hook-secret";

pub async fn verification_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<VerificationEmailRequest>,
) -> Result<StatusCode, AppError> {
    let provided = headers
        .get(HOOK_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let matches: bool = provided.as_bytes().ct_eq(state.hook_secret.as_bytes()).into();
    if !matches {
        tracing::warn!("verification hook called with wrong secret");
        return Err(AppError::Unauthorized);
    }

    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    state.mailer.send(&req.email, &req.url).await?;

    Ok(StatusCode::ACCEPTED)
}
