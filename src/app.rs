/*
 * Responsibility
 * - Config読み込み → 依存生成 (db / cache / http / mail) → Router 組み立て
 * - Middleware の適用 (edge gate / CORS / security headers / http)
 * - axum::serve() で起動
 */
use std::sync::Arc;
use std::{panic, process, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::access::AccessGate;
use crate::config::{Config, SessionSource};
use crate::repos::session_repo::SessionRepo;
use crate::services::email::{EmailSender, LogEmailSender, ResendEmailSender, VerificationMailer};
use crate::services::infra;
use crate::session::{DbSessionResolver, ProviderSessionResolver, SessionResolver};
use crate::state::AppState;
use crate::{api, middleware, web};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,starter_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing (stderr can be hidden depending on how the process is launched).
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        session_source = ?config.session_source,
        route_match_policy = ?config.route_match_policy,
        "starting server"
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let sessions: Arc<dyn SessionResolver> = match config.session_source {
        SessionSource::Database => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the database session source")?;
            let pool = infra::db(url).await.context("connect postgres")?;
            Arc::new(DbSessionResolver::new(
                SessionRepo::new(pool),
                config.session_cookie_name.clone(),
            ))
        }
        SessionSource::Provider => {
            let http = infra::http().await.context("build http client")?;
            Arc::new(
                ProviderSessionResolver::new(http, &config.auth_base_url)
                    .context("build get-session endpoint")?,
            )
        }
    };

    let cache = Arc::new(infra::cache(&config.redis_url).await.context("connect valkey")?);

    let sender: Arc<dyn EmailSender> = match config.resend_api_key.as_deref() {
        Some(key) => Arc::new(ResendEmailSender::new(key, config.mail_from.clone())),
        None => {
            tracing::warn!("RESEND_API_KEY not set; emails are only logged");
            Arc::new(LogEmailSender::new(config.mail_from.clone()))
        }
    };

    let mailer = VerificationMailer::new(
        sender,
        cache,
        Duration::from_secs(config.verification_cooldown_seconds),
    );

    Ok(AppState::new(
        sessions,
        AccessGate::with_policy(config.route_match_policy),
        mailer,
        config.hook_secret.as_str(),
        config.auth_base_url.as_str().trim_end_matches('/'),
    ))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let pages = middleware::gate::apply(web::routes(), state.clone());
    let api = middleware::cors::apply(api::v1::routes(), config);

    let router = Router::new()
        .merge(pages)
        .nest("/api/v1", api)
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router)
}
