/*
 * Responsibility
 * - render 時の二重チェック (edge middleware とは独立に session を解決して gate を再評価)
 * - 認証済みページ共通の layout (sidebar)
 *
 * Notes
 * - edge で解決した session は受け取らない (共有しない)
 * - 判定ロジックは AccessGate のみ。ここでは呼び出すだけ
 */
use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::error::AppError;
use crate::session::{Session, SessionUser};
use crate::state::AppState;
use crate::web::html::{document, escape};

const NAV: &[(&str, &str)] = &[("/dashboard", "Dashboard"), ("/settings", "Settings")];

/// Render-level gate: the page only renders when the gate allows it.
///
/// Rejects with a redirect, or 503 when the session cannot be resolved.
pub struct RenderGate {
    pub session: Option<Session>,
    pub path: String,
}

impl FromRequestParts<AppState> for RenderGate {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| &uri.0)
            .unwrap_or(&parts.uri);
        let path = uri.path().to_string();
        let target = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or(uri.path())
            .to_string();

        let session = state
            .sessions
            .resolve(&parts.headers)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        let decision = state.gate.evaluate(&target, session.as_ref());
        match decision.redirect() {
            None => Ok(Self { session, path }),
            Some(redirect) => {
                tracing::debug!(
                    path = %path,
                    has_session = session.is_some(),
                    decision = ?decision,
                    "render gate redirect"
                );
                Err(redirect.into_response())
            }
        }
    }
}

/// Layout for pages that always need a session (dashboard, settings).
///
/// Requires a session regardless of how the path classifies.
pub struct AuthedLayout {
    pub session: Session,
    pub path: String,
}

impl FromRequestParts<AppState> for AuthedLayout {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RenderGate { session, path } = RenderGate::from_request_parts(parts, state).await?;

        let Some(session) = session else {
            return Err(Redirect::temporary(state.gate.auth_entry()).into_response());
        };

        Ok(Self { session, path })
    }
}

impl AuthedLayout {
    pub fn user(&self) -> &SessionUser {
        &self.session.user
    }

    /// Render `main` (already escaped) next to the sidebar.
    pub fn render(&self, title: &str, main: &str) -> Html<String> {
        let body = format!(
            "<div class=\"layout\">{}<main>{}</main></div>",
            sidebar(self.user(), &self.path),
            main
        );
        document(title, &body)
    }
}

pub fn is_active(path: &str, href: &str) -> bool {
    path == href || (href != "/" && path.starts_with(href))
}

fn sidebar(user: &SessionUser, path: &str) -> String {
    let links: String = NAV
        .iter()
        .map(|(href, label)| {
            let class = if is_active(path, href) {
                " class=\"active\" aria-current=\"page\""
            } else {
                ""
            };
            format!("<li><a href=\"{href}\"{class}>{label}</a></li>")
        })
        .collect();

    let avatar = match user.image.as_deref().filter(|s| !s.is_empty()) {
        Some(src) => format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
            escape(src),
            escape(&user.initials())
        ),
        None => format!("<span class=\"avatar\">{}</span>", escape(&user.initials())),
    };

    format!(
        "<aside class=\"sidebar\"><nav><ul>{links}</ul></nav>\
         <div class=\"account\">{avatar}<span>{}</span><span>{}</span></div></aside>",
        escape(user.display_name().unwrap_or("User")),
        escape(&user.email),
    )
}
