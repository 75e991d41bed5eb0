//! Edge access check.
//!
//! Runs before any page handler: classifies the path, resolves the session
//! when the class depends on it, and either lets the request through or
//! answers with a redirect. The resolved session is *not* handed to the
//! handler; the page layout resolves its own.
//!
//! Resolver failure fails the request (503) instead of treating the visitor
//! as signed out.

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::access::RouteClass;
use crate::error::AppError;
use crate::state::AppState;

/// Apply the edge gate to every route of `router`.
///
/// ```ignore
/// let pages = web::routes();
/// let pages = middleware::gate::apply(pages, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, edge_gate))
}

async fn edge_gate(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = original_uri.path();
    let target = original_uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(path);
    let class = state.gate.classify(target);

    // public pages are allowed with or without a session
    if class == RouteClass::Public {
        return Ok(next.run(req).await);
    }

    let session = state.sessions.resolve(req.headers()).await?;

    let decision = state.gate.decide(session.as_ref(), class);
    match decision.redirect() {
        None => Ok(next.run(req).await),
        Some(redirect) => {
            tracing::debug!(
                path = %path,
                class = ?class,
                has_session = session.is_some(),
                decision = ?decision,
                "edge gate redirect"
            );
            Ok(redirect.into_response())
        }
    }
}
