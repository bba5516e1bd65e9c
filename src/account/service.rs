//! Account service: idempotent "ensure user exists".

use sqlx::SqlitePool;

use super::{User, UserRepository};
use crate::{CumulusError, Result};

/// Service for establishing username-only identities.
pub struct AccountService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Ensure an account exists for the given username.
    ///
    /// Looks up by exact match; creates the user if absent. Repeated
    /// calls with the same username return the original record and
    /// persist nothing new.
    ///
    /// Two concurrent first logins may both attempt the insert; the
    /// UNIQUE index on `username` is the only safeguard, and the losing
    /// writer receives `CumulusError::Conflict`.
    pub async fn ensure_account(&self, username: &str) -> Result<User> {
        if username.is_empty() {
            return Err(CumulusError::Validation(
                "username is required".to_string(),
            ));
        }

        let repo = UserRepository::new(self.pool);

        if let Some(user) = repo.get_by_username(username).await? {
            return Ok(user);
        }

        repo.create(username).await
    }
}
