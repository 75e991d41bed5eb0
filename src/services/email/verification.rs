//! Verification-email delivery with a per-address cooldown.
//!
//! The identity provider issues the verification token and the link; this
//! service only delivers it. Repeated requests for the same address inside
//! the cooldown are refused. The cooldown key is a SHA-256 of the normalized
//! address so raw emails never land in the cache.

use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

use crate::services::cache::{CacheClient, CacheError};
use crate::services::email::sender::{EmailError, EmailMessage, EmailSender};
use crate::web::html::escape;

const SUBJECT: &str = "Verify your email address";
const TEMPLATE: &str = include_str!("../../../templates/verify_email.html");
const KEY_PREFIX: &str = "verify-email";

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("user email is missing or invalid")]
    InvalidEmail,
    #[error("verification url is invalid")]
    InvalidUrl,
    #[error("verification email recently sent")]
    CoolingDown,
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Delivery(#[from] EmailError),
}

pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.chars().any(char::is_whitespace) {
        return None;
    }
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

pub fn cooldown_key(normalized_email: &str) -> String {
    let digest = Sha256::digest(normalized_email.as_bytes());
    format!("{KEY_PREFIX}:{digest:x}")
}

pub fn render(url: &Url) -> String {
    TEMPLATE.replace("{{URL}}", &escape(url.as_str()))
}

#[derive(Clone)]
pub struct VerificationMailer {
    sender: Arc<dyn EmailSender>,
    cache: Arc<dyn CacheClient>,
    cooldown: Duration,
}

impl VerificationMailer {
    pub fn new(
        sender: Arc<dyn EmailSender>,
        cache: Arc<dyn CacheClient>,
        cooldown: Duration,
    ) -> Self {
        Self {
            sender,
            cache,
            cooldown,
        }
    }

    pub async fn send(&self, email: &str, url: &str) -> Result<(), VerificationError> {
        let normalized = normalize_email(email).ok_or(VerificationError::InvalidEmail)?;

        let url = Url::parse(url).map_err(|_| VerificationError::InvalidUrl)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(VerificationError::InvalidUrl);
        }

        let key = cooldown_key(&normalized);
        let first = self
            .cache
            .set_if_absent_with_ttl(&key, "1", self.cooldown)
            .await?;
        if !first {
            return Err(VerificationError::CoolingDown);
        }

        let message = EmailMessage {
            from: None,
            // deliver to the address as given; only the cooldown key is normalized
            to: email.trim().to_string(),
            subject: SUBJECT.to_string(),
            html: render(&url),
        };

        if let Err(err) = self.sender.send(message).await {
            // let the user retry right away
            if let Err(cache_err) = self.cache.del(&key).await {
                tracing::warn!(error = %cache_err, "failed to release verification cooldown");
            }
            return Err(err.into());
        }

        tracing::info!(backend = self.sender.backend_name(), "verification email sent");
        Ok(())
    }
}
