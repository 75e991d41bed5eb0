//! Email delivery abstraction.
//!
//! Delivery is delegated to a provider (Resend in production). Local
//! development uses `LogEmailSender`, which logs the message and returns `Ok`.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailMessage {
    /// `None` falls back to the sender's configured default.
    pub from: Option<String>,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait EmailSender: Send + Sync + 'static {
    fn backend_name(&self) -> &'static str;

    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}

#[derive(Clone, Debug)]
pub struct LogEmailSender {
    default_from: String,
}

impl LogEmailSender {
    pub fn new(default_from: impl Into<String>) -> Self {
        Self {
            default_from: default_from.into(),
        }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    fn backend_name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let from = message.from.as_deref().unwrap_or(&self.default_from);
        tracing::info!(
            from = %from,
            to = %message.to,
            subject = %message.subject,
            html = %message.html,
            "email send stub"
        );
        Ok(())
    }
}
