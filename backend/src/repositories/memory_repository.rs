//! In-memory implementation of the user and session stores.
//!
//! Deterministic stand-in for SQLite that honours the same soft-delete and
//! uniqueness rules. Backs the service and handler tests.

use crate::database::models::{Session, User, UserChanges};
use crate::repositories::{SessionStore, UserStore};
use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<String, User>>,
    sessions: RwLock<HashMap<String, Session>>,
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, email: &str, name: &str, password_hash: &str) -> Result<User> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|user| user.deleted_at.is_none() && user.email == email)
        {
            bail!("UNIQUE constraint failed: users.email");
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.deleted_at.is_none() && user.email == email)
            .cloned())
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).filter(|user| user.deleted_at.is_none()).cloned())
    }

    async fn update_user_by_id(&self, id: &str, changes: &UserChanges) -> Result<Option<User>> {
        let mut users = self.users.write().await;

        if let Some(email) = changes.email()
            && users
                .values()
                .any(|other| other.id != id && other.deleted_at.is_none() && other.email == email)
        {
            bail!("UNIQUE constraint failed: users.email");
        }

        let Some(user) = users.get_mut(id).filter(|user| user.deleted_at.is_none()) else {
            return Ok(None);
        };
        if changes.is_empty() {
            return Ok(Some(user.clone()));
        }

        if let Some(email) = changes.email() {
            user.email = email.to_string();
        }
        if let Some(name) = changes.name() {
            user.name = name.to_string();
        }
        if let Some(password_hash) = changes.password_hash() {
            user.password_hash = password_hash.to_string();
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn soft_delete_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(id).filter(|user| user.deleted_at.is_none()) else {
            return Ok(None);
        };

        let now = Utc::now();
        user.deleted_at = Some(now);
        user.updated_at = now;
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn create_session(&self, user_id: &str, expires_at: DateTime<Utc>) -> Result<Session> {
        let session = Session {
            id: Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            expires_at,
            deleted_at: None,
        };
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session_by_id(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn soft_delete_session_by_id(&self, id: &str) -> Result<u64> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session) if session.deleted_at.is_none() => {
                session.deleted_at = Some(Utc::now());
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_soft_deleted_user_is_excluded() {
        let store = InMemoryStore::default();
        let user = store.create_user("a@b.com", "Alice", "hash").await.unwrap();

        assert!(store.create_user("a@b.com", "Again", "hash").await.is_err());

        store.soft_delete_user_by_id(&user.id).await.unwrap().unwrap();
        assert!(store.get_user_by_email("a@b.com").await.unwrap().is_none());
        assert!(store.get_user_by_id(&user.id).await.unwrap().is_none());
        assert!(store.soft_delete_user_by_id(&user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let store = InMemoryStore::default();
        let user = store.create_user("a@b.com", "Alice", "hash").await.unwrap();

        let changes = UserChanges {
            email: Some(String::new()),
            name: Some("newname".to_string()),
            password_hash: Some(String::new()),
        };
        let updated = store.update_user_by_id(&user.id, &changes).await.unwrap().unwrap();

        assert_eq!(updated.name, "newname");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.password_hash, user.password_hash);
        assert!(store.update_user_by_id("missing", &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_soft_delete_counts() {
        let store = InMemoryStore::default();
        let session = store
            .create_session("user", Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(store.soft_delete_session_by_id(&session.id).await.unwrap(), 1);
        assert_eq!(store.soft_delete_session_by_id(&session.id).await.unwrap(), 0);
        assert_eq!(store.soft_delete_session_by_id("missing").await.unwrap(), 0);
    }
}
