use async_trait::async_trait;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

use crate::services::email::sender::{EmailError, EmailMessage, EmailSender};

/// Resend-backed sender.
pub struct ResendEmailSender {
    client: Resend,
    default_from: String,
}

impl ResendEmailSender {
    pub fn new(api_key: &str, default_from: impl Into<String>) -> Self {
        Self {
            client: Resend::new(api_key),
            default_from: default_from.into(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    fn backend_name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let from = message.from.as_deref().unwrap_or(&self.default_from);
        let to = [message.to.as_str()];

        let email =
            CreateEmailBaseOptions::new(from, to, &message.subject).with_html(&message.html);

        let sent = self.client.emails.send(email).await.map_err(|e| {
            tracing::error!(error = %e, to = %message.to, "resend send failed");
            EmailError::Delivery(e.to_string())
        })?;

        tracing::debug!(id = ?sent.id, "resend accepted email");
        Ok(())
    }
}
