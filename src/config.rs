/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, REDIS_URL, identity provider, mail など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

use crate::access::MatchPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Where sessions are resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Read the identity provider's session/user tables directly.
    Database,
    /// Ask the identity provider over HTTP (`/api/auth/get-session`).
    Provider,
}

impl FromStr for SessionSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Ok(Self::Database),
            "provider" | "http" => Ok(Self::Provider),
            _ => Err(ConfigError::Invalid("SESSION_SOURCE")),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_SESSION_COOKIE: &str = "better-auth.session_token";
pub const DEFAULT_MAIL_FROM: &str = "Your App <onboarding@resend.dev>";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub database_url: Option<String>,
    pub redis_url: String,

    // identity provider
    pub auth_base_url: Url,
    pub session_source: SessionSource,
    pub session_cookie_name: String,
    pub route_match_policy: MatchPolicy,

    // mail
    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub hook_secret: String,
    pub verification_cooldown_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let session_source = match std::env::var("SESSION_SOURCE") {
            Ok(v) => v.parse()?,
            Err(_) => SessionSource::Database,
        };

        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        // the database resolver cannot run without it
        if session_source == SessionSource::Database && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let redis_url =
            std::env::var("REDIS_URL").map_err(|_| ConfigError::Missing("REDIS_URL"))?;

        let auth_base_url = std::env::var("AUTH_BASE_URL")
            .map_err(|_| ConfigError::Missing("AUTH_BASE_URL"))?;
        let auth_base_url =
            Url::parse(&auth_base_url).map_err(|_| ConfigError::Invalid("AUTH_BASE_URL"))?;

        let session_cookie_name = std::env::var("SESSION_COOKIE_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());

        let route_match_policy = match std::env::var("ROUTE_MATCH_POLICY") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("ROUTE_MATCH_POLICY"))?,
            Err(_) => MatchPolicy::Segment,
        };

        let resend_api_key = std::env::var("RESEND_API_KEY").ok().filter(|s| !s.is_empty());
        if app_env.is_production() && resend_api_key.is_none() {
            return Err(ConfigError::Missing("RESEND_API_KEY"));
        }

        let mail_from = std::env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_string());

        let hook_secret =
            std::env::var("HOOK_SECRET").map_err(|_| ConfigError::Missing("HOOK_SECRET"))?;
        if hook_secret.len() < 16 {
            return Err(ConfigError::Invalid("HOOK_SECRET"));
        }

        let verification_cooldown_seconds = std::env::var("VERIFICATION_COOLDOWN_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            database_url,
            redis_url,
            auth_base_url,
            session_source,
            session_cookie_name,
            route_match_policy,
            resend_api_key,
            mail_from,
            hook_secret,
            verification_cooldown_seconds,
        })
    }
}
