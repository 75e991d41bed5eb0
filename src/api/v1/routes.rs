/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /session, /hooks/verification-email
 * - API は edge gate の対象外 (session が必要な handler は自分で解決する)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{health::health, hooks::verification_email, session::current_session};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/session", get(current_session))
        .route("/hooks/verification-email", post(verification_email))
}
