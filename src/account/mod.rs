//! Account types and repository for Cumulus.
//!
//! Identity here is username-only: an account is just a unique name the
//! metadata store has seen before.

mod service;

pub use service::AccountService;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::Result;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Username, unique and case-sensitive.
    pub username: String,
    /// When the account was first seen.
    pub created_at: DateTime<Utc>,
}

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A duplicate
    /// username surfaces as `CumulusError::Conflict` via the UNIQUE
    /// index on `users.username`.
    pub async fn create(&self, username: &str) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username) VALUES (?)")
            .bind(username)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| crate::CumulusError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a user by username (exact, case-sensitive match).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn test_create_and_get_user() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let user = repo.create("alice").await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.id > 0);

        let by_id = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id, user);

        let by_name = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name, user);
    }

    #[tokio::test]
    async fn test_get_unknown_username() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let found = repo.get_by_username("nobody").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_username_is_case_sensitive() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create("Alice").await.unwrap();

        let found = repo.get_by_username("alice").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create("alice").await.unwrap();
        let dup = repo.create("alice").await;

        assert!(matches!(dup, Err(crate::CumulusError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_count() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.create("alice").await.unwrap();
        repo.create("bob").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
