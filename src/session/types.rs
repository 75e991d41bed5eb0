/*
 * Responsibility
 * - handler / gate から見える「解決済みセッション」の型
 * - identity provider が所有するデータの read-only snapshot（この層では変更しない）
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    pub image: Option<String>,
}

impl SessionUser {
    /// Up to two initials from the name, falling back to the email; `U` when both are blank.
    pub fn initials(&self) -> String {
        let src = if self.name.trim().is_empty() {
            self.email.trim()
        } else {
            self.name.trim()
        };

        let initials: String = src
            .split_whitespace()
            .take(2)
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    /// Name for greetings; `None` when the user never set one.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// A session as attested by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> SessionUser {
        SessionUser {
            id: "u1".into(),
            name: name.into(),
            email: email.into(),
            email_verified: false,
            image: None,
        }
    }

    #[test]
    fn initials_from_name() {
        assert_eq!(user("ada lovelace", "").initials(), "AL");
        assert_eq!(user("Grace Brewster Hopper", "").initials(), "GB");
        assert_eq!(user("  linus ", "").initials(), "L");
    }

    #[test]
    fn initials_fall_back_to_email_then_u() {
        assert_eq!(user("", "ada@example.com").initials(), "A");
        assert_eq!(user(" ", "  ").initials(), "U");
    }

    #[test]
    fn deserializes_provider_user_shape() {
        let json = r#"{
            "id": "usr_1",
            "name": "Ada",
            "email": "ada@example.com",
            "emailVerified": true,
            "image": null,
            "createdAt": "2025-01-01T00:00:00.000Z"
        }"#;
        let u: SessionUser = serde_json::from_str(json).unwrap();
        assert!(u.email_verified);
        assert_eq!(u.display_name(), Some("Ada"));
    }
}
