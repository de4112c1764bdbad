//! Rust structs that represent database table mappings.
//!
//! These models define the structure of user and session rows as they are
//! stored in and retrieved from the database. `User` doubles as the external
//! JSON representation, so its serialization must never expose the hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(rename = "uuid")]
    pub id: String,
    pub email: String,
    pub name: String,
    /// bcrypt hash. Skipped on serialization regardless of its contents.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Session {
    #[serde(rename = "uuid")]
    pub id: String,
    #[serde(rename = "user_uuid")]
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A session backs an identity only while it is neither soft-deleted nor expired.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.deleted_at.is_none() && now < self.expires_at
    }
}

/// Partial update applied by `UserStore::update_user_by_id`.
///
/// `None` and empty strings both leave the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn password_hash(&self) -> Option<&str> {
        non_empty(&self.password_hash)
    }

    pub fn is_empty(&self) -> bool {
        self.email().is_none() && self.name().is_none() && self.password_hash().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_user() -> User {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        User {
            id: "abc".to_string(),
            email: "test@test.com".to_string(),
            name: "Testy".to_string(),
            password_hash: "abasjdlsjfsdjflkdjsf".to_string(),
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }

    #[test]
    fn test_user_json_omits_password_hash() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert_eq!(
            json,
            r#"{"uuid":"abc","email":"test@test.com","name":"Testy","created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}"#
        );
        assert!(!json.contains("abasjdlsjfsdjflkdjsf"));
    }

    #[test]
    fn test_deleted_user_json_includes_deleted_at_only() {
        let mut user = sample_user();
        user.deleted_at = Some(user.created_at + Duration::hours(1));

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["deleted_at"], "2024-01-01T01:00:00Z");
        assert!(value.get("password_hash").is_none());
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_session_liveness() {
        let now = Utc::now();
        let mut session = Session {
            id: "s".to_string(),
            user_id: "u".to_string(),
            created_at: now,
            expires_at: now + Duration::hours(1),
            deleted_at: None,
        };
        assert!(session.is_live_at(now));
        assert!(!session.is_live_at(now + Duration::hours(1)));

        session.deleted_at = Some(now);
        assert!(!session.is_live_at(now));
    }

    #[test]
    fn test_empty_strings_are_not_changes() {
        let changes = UserChanges {
            email: Some(String::new()),
            name: Some("newname".to_string()),
            password_hash: None,
        };
        assert_eq!(changes.email(), None);
        assert_eq!(changes.name(), Some("newname"));
        assert!(!changes.is_empty());
        assert!(UserChanges::default().is_empty());
    }
}
