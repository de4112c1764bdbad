//! Database repository for user management operations.
//!
//! Provides CRUD operations for users. Every read and write filters on
//! `deleted_at IS NULL`, so a soft-deleted user is invisible to the service.

use crate::database::models::{User, UserChanges};
use crate::repositories::UserStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Repository for user database operations.
#[derive(Clone)]
pub struct SqliteUserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool (cheap to clone)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteUserRepository {
    /// Creates a new user in the database.
    ///
    /// # Returns
    /// The newly created User with all fields populated
    async fn create_user(&self, email: &str, name: &str, password_hash: &str) -> Result<User> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, email, name, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a live user by email (exact, case-sensitive match).
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, created_at, updated_at, deleted_at
            FROM users WHERE email = ? AND deleted_at IS NULL
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, created_at, updated_at, deleted_at
            FROM users WHERE id = ? AND deleted_at IS NULL
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Partially updates a live user.
    ///
    /// Empty fields bind as NULL and fall back to the current column value.
    async fn update_user_by_id(&self, id: &str, changes: &UserChanges) -> Result<Option<User>> {
        if changes.is_empty() {
            return self.get_user_by_id(id).await;
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                email = COALESCE(?, email),
                name = COALESCE(?, name),
                password_hash = COALESCE(?, password_hash),
                updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            RETURNING id, email, name, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(changes.email())
        .bind(changes.name())
        .bind(changes.password_hash())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Marks a user as deleted (soft deletion).
    ///
    /// Sets `deleted_at` and `updated_at` to the same instant. Already deleted
    /// rows are not touched.
    async fn soft_delete_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET deleted_at = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            RETURNING id, email, name, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
