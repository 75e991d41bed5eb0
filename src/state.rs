/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - sessions: SessionResolver, gate: AccessGate, mailer: VerificationMailer など
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::access::AccessGate;
use crate::services::email::VerificationMailer;
use crate::session::SessionResolver;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionResolver>,
    pub gate: AccessGate,
    pub mailer: VerificationMailer,
    pub hook_secret: Arc<str>,
    pub auth_base_url: Arc<str>,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionResolver>,
        gate: AccessGate,
        mailer: VerificationMailer,
        hook_secret: impl Into<Arc<str>>,
        auth_base_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            sessions,
            gate,
            mailer,
            hook_secret: hook_secret.into(),
            auth_base_url: auth_base_url.into(),
        }
    }
}
