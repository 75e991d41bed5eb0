/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - ResolverError / VerificationError などを統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::email::VerificationError;
use crate::session::ResolverError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("too many requests")]
    TooManyRequests,
    /// The identity source could not answer; never treated as "signed out".
    #[error("session unavailable")]
    SessionUnavailable,
    #[error("upstream failure")]
    BadGateway,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".into(),
            ),
            AppError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "TOO_MANY_REQUESTS",
                "try again later".into(),
            ),
            AppError::SessionUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SESSION_UNAVAILABLE",
                "session service unavailable".into(),
            ),
            AppError::BadGateway => (
                StatusCode::BAD_GATEWAY,
                "BAD_GATEWAY",
                "upstream failure".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ResolverError> for AppError {
    fn from(e: ResolverError) -> Self {
        tracing::error!(error = %e, "session resolution failed");
        AppError::SessionUnavailable
    }
}

impl From<VerificationError> for AppError {
    fn from(e: VerificationError) -> Self {
        match e {
            VerificationError::InvalidEmail => {
                AppError::bad_request("INVALID_EMAIL", "user email is missing or invalid")
            }
            VerificationError::InvalidUrl => {
                AppError::bad_request("INVALID_URL", "verification url is invalid")
            }
            VerificationError::CoolingDown => {
                tracing::warn!("verification email throttled");
                AppError::TooManyRequests
            }
            VerificationError::Delivery(_) => AppError::BadGateway,
            VerificationError::Cache(err) => {
                tracing::error!(error = %err, "cache failure while sending verification email");
                AppError::Internal
            }
        }
    }
}
