//! Storage capabilities for users and sessions.
//!
//! The services depend on the [`UserStore`] and [`SessionStore`] traits only.
//! `AppState` decides at construction time whether they are backed by SQLite
//! or by the in-memory store used in tests.
//!
//! Lookups signal "no such row" with `Ok(None)`. Soft-deleted users are never
//! returned by lookups and cannot be updated or deleted again.

#[cfg(test)]
pub mod memory_repository;
pub mod session_repository;
pub mod user_repository;

use crate::database::models::{Session, User, UserChanges};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user. The hash must already be computed.
    async fn create_user(&self, email: &str, name: &str, password_hash: &str) -> Result<User>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Applies the non-empty fields of `changes`.
    ///
    /// Returns `Ok(None)` when no live user matched, which is distinct from a
    /// successful update.
    async fn update_user_by_id(&self, id: &str, changes: &UserChanges) -> Result<Option<User>>;

    /// Stamps `deleted_at` and `updated_at`. Returns `Ok(None)` if the user is
    /// absent or already deleted.
    async fn soft_delete_user_by_id(&self, id: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, user_id: &str, expires_at: DateTime<Utc>) -> Result<Session>;

    /// Returns the session whatever its state; callers check liveness.
    async fn get_session_by_id(&self, id: &str) -> Result<Option<Session>>;

    /// Soft-deletes a live session and returns the number of rows affected.
    /// Zero means absent or already deleted, not an error.
    async fn soft_delete_session_by_id(&self, id: &str) -> Result<u64>;
}
