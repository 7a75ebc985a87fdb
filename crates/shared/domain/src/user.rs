//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advert::Advert;
use crate::message::Message;

/// User domain entity with adverts and messages expanded.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing)]
    pub salt: String,
    /// Plain text password as supplied at creation.
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    /// Message references in append order
    pub messages: Vec<Message>,
    /// Advert references in append order
    pub adverts: Vec<Advert>,
    pub created_at: DateTime<Utc>,
}

/// User creation options
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Initial message references
    #[serde(default)]
    pub messages: Vec<Uuid>,
    /// Initial advert references
    #[serde(default)]
    pub adverts: Vec<Uuid>,
}

impl NewUser {
    /// Options with no picture, phone number or references.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }
}

/// Partial update of a user's contact fields.
///
/// A field is replaced only when the patch carries a non-empty value.
/// `None` and `Some("")` both keep the existing value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSettings {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub picture_url: Option<String>,
}

impl UserSettings {
    pub fn email(&self) -> Option<&str> {
        replacement(&self.email)
    }

    pub fn phone_number(&self) -> Option<&str> {
        replacement(&self.phone_number)
    }

    pub fn picture_url(&self) -> Option<&str> {
        replacement(&self.picture_url)
    }

    /// True when applying this patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.email().is_none() && self.phone_number().is_none() && self.picture_url().is_none()
    }

    /// Merge the patch into `user`.
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = self.email() {
            user.email = email.to_string();
        }
        if let Some(phone_number) = self.phone_number() {
            user.phone_number = Some(phone_number.to_string());
        }
        if let Some(picture_url) = self.picture_url() {
            user.picture_url = Some(picture_url.to_string());
        }
    }
}

fn replacement(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Raw acknowledgement of a single-field update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    /// Number of user records the update touched
    pub rows_affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            picture_url: Some("https://img.example/alice.png".to_string()),
            phone_number: Some("+100200300".to_string()),
            salt: "salt".to_string(),
            password: "pw123".to_string(),
            hash_pass: "hash".to_string(),
            messages: vec![],
            adverts: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_settings_keep_fields() {
        let mut user = sample_user();
        let before = user.clone();

        let settings = UserSettings::default();
        assert!(settings.is_empty());
        settings.apply(&mut user);

        assert_eq!(user.email, before.email);
        assert_eq!(user.phone_number, before.phone_number);
        assert_eq!(user.picture_url, before.picture_url);
    }

    #[test]
    fn test_email_only_changes_email() {
        let mut user = sample_user();
        let before = user.clone();

        UserSettings {
            email: Some("a@b.com".to_string()),
            ..Default::default()
        }
        .apply(&mut user);

        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.phone_number, before.phone_number);
        assert_eq!(user.picture_url, before.picture_url);
    }

    #[test]
    fn test_empty_strings_are_ignored() {
        let mut user = sample_user();
        let before = user.clone();

        let settings = UserSettings {
            email: Some(String::new()),
            phone_number: Some(String::new()),
            picture_url: Some(String::new()),
        };
        assert!(settings.is_empty());
        settings.apply(&mut user);

        assert_eq!(user.email, before.email);
        assert_eq!(user.phone_number, before.phone_number);
        assert_eq!(user.picture_url, before.picture_url);
    }

    #[test]
    fn test_settings_fill_missing_fields() {
        let mut user = sample_user();
        user.phone_number = None;
        user.picture_url = None;

        UserSettings {
            email: None,
            phone_number: Some("555-0100".to_string()),
            picture_url: Some("https://img.example/new.png".to_string()),
        }
        .apply(&mut user);

        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(user.picture_url.as_deref(), Some("https://img.example/new.png"));
    }

    #[test]
    fn test_secrets_not_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();

        assert!(json.get("salt").is_none());
        assert!(json.get("password").is_none());
        assert!(json.get("hash_pass").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_new_user_defaults() {
        let options = NewUser::new("alice", "a@x.com", "pw123");

        assert_eq!(options.username, "alice");
        assert!(options.picture_url.is_none());
        assert!(options.phone_number.is_none());
        assert!(options.messages.is_empty());
        assert!(options.adverts.is_empty());
    }
}
