#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, Response};
use chrono::{Duration as ChronoDuration, Utc};
use tower::ServiceExt;

use starter_gate::access::{AccessGate, MatchPolicy};
use starter_gate::config::{AppEnv, Config, SessionSource};
use starter_gate::services::cache::{CacheClient, CacheResult};
use starter_gate::services::email::{EmailError, EmailMessage, EmailSender, VerificationMailer};
use starter_gate::session::{ResolverError, Session, SessionResolver, SessionUser};
use starter_gate::state::AppState;

pub const HOOK_SECRET: &str = "test-hook-secret-0123456789";
pub const AUTH_BASE: &str = "https://id.example.com";

pub fn session(verified: bool) -> Session {
    Session {
        id: "ses_1".into(),
        expires_at: Utc::now() + ChronoDuration::hours(1),
        user: SessionUser {
            id: "usr_1".into(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            email_verified: verified,
            image: None,
        },
    }
}

/// Returns the same answer for every request and counts lookups.
pub struct StaticResolver {
    session: Option<Session>,
    pub calls: AtomicUsize,
}

impl StaticResolver {
    pub fn new(session: Option<Session>) -> Arc<Self> {
        Arc::new(Self {
            session,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionResolver for StaticResolver {
    fn backend_name(&self) -> &'static str {
        "static"
    }

    async fn resolve(&self, _headers: &HeaderMap) -> Result<Option<Session>, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.session.clone())
    }
}

pub struct FailingResolver;

#[async_trait]
impl SessionResolver for FailingResolver {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn resolve(&self, _headers: &HeaderMap) -> Result<Option<Session>, ResolverError> {
        Err(ResolverError::Unreachable("connection refused".into()))
    }
}

#[derive(Default)]
pub struct MemoryCache {
    keys: Mutex<HashSet<String>>,
}

#[async_trait]
impl CacheClient for MemoryCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn set_if_absent_with_ttl(
        &self,
        key: &str,
        _value: &str,
        _ttl: Duration,
    ) -> CacheResult<bool> {
        Ok(self.keys.lock().unwrap().insert(key.to_string()))
    }

    async fn del(&self, key: &str) -> CacheResult<u64> {
        Ok(u64::from(self.keys.lock().unwrap().remove(key)))
    }
}

#[derive(Default)]
pub struct RecordingSender {
    pub fail: bool,
    pub sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    fn backend_name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.fail {
            return Err(EmailError::Delivery("provider down".into()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub fn config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        database_url: None,
        redis_url: "redis://127.0.0.1:6379".into(),
        auth_base_url: AUTH_BASE.parse().unwrap(),
        session_source: SessionSource::Provider,
        session_cookie_name: "better-auth.session_token".into(),
        route_match_policy: MatchPolicy::Segment,
        resend_api_key: None,
        mail_from: "Test <test@example.com>".into(),
        hook_secret: HOOK_SECRET.into(),
        verification_cooldown_seconds: 60,
    }
}

pub struct TestApp {
    pub router: Router,
    pub sender: Arc<RecordingSender>,
    pub cache: Arc<MemoryCache>,
}

pub fn app_with(sessions: Arc<dyn SessionResolver>) -> TestApp {
    app_with_sender(sessions, Arc::new(RecordingSender::default()))
}

pub fn app_with_sender(sessions: Arc<dyn SessionResolver>, sender: Arc<RecordingSender>) -> TestApp {
    let cache = Arc::new(MemoryCache::default());
    let mailer = VerificationMailer::new(sender.clone(), cache.clone(), Duration::from_secs(60));
    let state = AppState::new(sessions, AccessGate::default(), mailer, HOOK_SECRET, AUTH_BASE);

    TestApp {
        router: starter_gate::app::build_router(state, &config()),
        sender,
        cache,
    }
}

/// Page routes with only the render-level gate (no edge middleware).
pub fn pages_without_edge(sessions: Arc<dyn SessionResolver>) -> Router {
    let cache = Arc::new(MemoryCache::default());
    let sender = Arc::new(RecordingSender::default());
    let mailer = VerificationMailer::new(sender, cache, Duration::from_secs(60));
    let state = AppState::new(sessions, AccessGate::default(), mailer, HOOK_SECRET, AUTH_BASE);

    starter_gate::web::routes().with_state(state)
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub fn location(res: &Response<Body>) -> Option<&str> {
    res.headers().get("location").and_then(|v| v.to_str().ok())
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
