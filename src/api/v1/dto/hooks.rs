/*
 * Responsibility
 * - identity provider からの callback payload
 */
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VerificationEmailRequest {
    pub email: String,
    pub url: String,
}

impl VerificationEmailRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        if self.url.trim().is_empty() {
            return Err("url is required");
        }
        if self.url.len() > 2048 {
            return Err("url must be <= 2048 chars");
        }
        Ok(())
    }
}
