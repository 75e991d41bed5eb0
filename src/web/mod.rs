/*
 * Responsibility
 * - page の URL 構造を定義
 * - edge gate は app.rs で page router 全体に掛ける
 */
pub mod html;
pub mod layout;
pub mod pages;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/auth", get(pages::auth))
        .route("/welcome", get(pages::welcome))
        .route("/dashboard", get(pages::dashboard))
        .route("/settings", get(pages::settings))
}
