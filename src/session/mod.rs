//! Client session state for Cumulus.
//!
//! Models the browser side of the application as an explicit state
//! machine: `LoggedOut` or `LoggedIn(username)`. Persistence of the
//! current identity goes through the injected `SessionStore` key-value
//! abstraction rather than any global, and the storage meter is a value
//! derived from the current file listing against a fixed quota. It
//! enforces nothing server-side.

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use crate::account::AccountService;
use crate::file::{FileRecord, FileService};
use crate::{CumulusError, Result};

/// Fixed display quota: 2 GiB.
pub const STORAGE_QUOTA_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Key under which the current username is persisted.
const USERNAME_KEY: &str = "username";

/// The two session states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No identity established.
    LoggedOut,
    /// Identity established for the given username.
    LoggedIn(String),
}

/// Derived storage usage, purely informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageUsage {
    /// Sum of sizes over the current file list.
    pub used_bytes: u64,
    /// Fixed display quota.
    pub quota_bytes: u64,
}

impl StorageUsage {
    /// Used fraction of the quota, clamped to 1.0.
    pub fn used_fraction(&self) -> f64 {
        if self.quota_bytes == 0 {
            return 0.0;
        }
        (self.used_bytes as f64 / self.quota_bytes as f64).min(1.0)
    }
}

/// Client session: state machine plus the cached file listing.
pub struct Session<'a, S: SessionStore> {
    store: &'a S,
    state: SessionState,
    files: Vec<FileRecord>,
}

impl<'a, S: SessionStore> Session<'a, S> {
    /// Create a new session in the LoggedOut state.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            state: SessionState::LoggedOut,
            files: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current username, if logged in.
    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn(username) => Some(username),
            SessionState::LoggedOut => None,
        }
    }

    /// Current cached file listing.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Transition LoggedOut -> LoggedIn.
    ///
    /// Establishes the account, persists the username to the session
    /// store and fetches the file listing. Fails without a state change
    /// if the username is empty or the backend is unavailable.
    pub async fn login(
        &mut self,
        accounts: &AccountService<'_>,
        files: &FileService<'_>,
        username: &str,
    ) -> Result<()> {
        let user = accounts.ensure_account(username).await?;

        self.store.set(USERNAME_KEY, &user.username)?;
        self.files = files.list_files(&user.username).await?;
        self.state = SessionState::LoggedIn(user.username);

        Ok(())
    }

    /// Transition LoggedIn -> LoggedOut.
    ///
    /// Clears the persisted identity and the in-memory file list.
    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(USERNAME_KEY)?;
        self.files.clear();
        self.state = SessionState::LoggedOut;
        Ok(())
    }

    /// Replay auto-login from the persisted identity, if any.
    ///
    /// Returns `true` if a stored username was found and the login
    /// transition was replayed.
    pub async fn restore(
        &mut self,
        accounts: &AccountService<'_>,
        files: &FileService<'_>,
    ) -> Result<bool> {
        match self.store.get(USERNAME_KEY)? {
            Some(username) if !username.is_empty() => {
                self.login(accounts, files, &username).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Re-fetch the file listing for the logged-in user.
    pub async fn refresh_files(&mut self, files: &FileService<'_>) -> Result<()> {
        let username = self
            .username()
            .ok_or_else(|| CumulusError::Validation("not logged in".to_string()))?
            .to_string();

        self.files = files.list_files(&username).await?;
        Ok(())
    }

    /// Derived storage usage for the current listing.
    pub fn storage_usage(&self) -> StorageUsage {
        let used_bytes: u64 = self.files.iter().map(|f| f.size.max(0) as u64).sum();
        StorageUsage {
            used_bytes,
            quota_bytes: STORAGE_QUOTA_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::storage::LocalObjectStore;
    use tempfile::TempDir;

    async fn setup() -> (Database, TempDir, LocalObjectStore) {
        let db = Database::open_in_memory().await.unwrap();
        let temp_dir = TempDir::new().unwrap();
        let store = LocalObjectStore::new(temp_dir.path(), "test-drive", "/objects").unwrap();
        (db, temp_dir, store)
    }

    #[tokio::test]
    async fn test_login_transition() {
        let (db, _temp_dir, object_store) = setup().await;
        let accounts = AccountService::new(db.pool());
        let files = FileService::new(db.pool(), &object_store);
        let kv = MemorySessionStore::new();

        let mut session = Session::new(&kv);
        assert_eq!(session.state(), &SessionState::LoggedOut);

        session.login(&accounts, &files, "alice").await.unwrap();

        assert_eq!(session.state(), &SessionState::LoggedIn("alice".to_string()));
        assert_eq!(session.username(), Some("alice"));
        assert!(session.files().is_empty());
        assert_eq!(kv.get("username").unwrap().as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_login_empty_username_no_transition() {
        let (db, _temp_dir, object_store) = setup().await;
        let accounts = AccountService::new(db.pool());
        let files = FileService::new(db.pool(), &object_store);
        let kv = MemorySessionStore::new();

        let mut session = Session::new(&kv);
        let result = session.login(&accounts, &files, "").await;

        assert!(result.is_err());
        assert_eq!(session.state(), &SessionState::LoggedOut);
        assert!(kv.get("username").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_state() {
        let (db, _temp_dir, object_store) = setup().await;
        let accounts = AccountService::new(db.pool());
        let files = FileService::new(db.pool(), &object_store);
        let kv = MemorySessionStore::new();

        let mut session = Session::new(&kv);
        session.login(&accounts, &files, "alice").await.unwrap();
        files.upload("alice", b"data", "a.txt").await.unwrap();
        session.refresh_files(&files).await.unwrap();
        assert_eq!(session.files().len(), 1);

        session.logout().unwrap();

        assert_eq!(session.state(), &SessionState::LoggedOut);
        assert!(session.files().is_empty());
        assert!(kv.get("username").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_restore_replays_login() {
        let (db, _temp_dir, object_store) = setup().await;
        let accounts = AccountService::new(db.pool());
        let files = FileService::new(db.pool(), &object_store);
        let kv = MemorySessionStore::new();

        {
            let mut session = Session::new(&kv);
            session.login(&accounts, &files, "alice").await.unwrap();
        }

        // Fresh session over the same persisted store: auto-login
        let mut session = Session::new(&kv);
        let restored = session.restore(&accounts, &files).await.unwrap();

        assert!(restored);
        assert_eq!(session.username(), Some("alice"));
    }

    #[tokio::test]
    async fn test_restore_without_stored_identity() {
        let (db, _temp_dir, object_store) = setup().await;
        let accounts = AccountService::new(db.pool());
        let files = FileService::new(db.pool(), &object_store);
        let kv = MemorySessionStore::new();

        let mut session = Session::new(&kv);
        let restored = session.restore(&accounts, &files).await.unwrap();

        assert!(!restored);
        assert_eq!(session.state(), &SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_refresh_files_requires_login() {
        let (db, _temp_dir, object_store) = setup().await;
        let files = FileService::new(db.pool(), &object_store);
        let kv = MemorySessionStore::new();

        let mut session = Session::new(&kv);
        let result = session.refresh_files(&files).await;

        assert!(matches!(result, Err(CumulusError::Validation(_))));
    }

    #[tokio::test]
    async fn test_storage_usage_is_derived() {
        let (db, _temp_dir, object_store) = setup().await;
        let accounts = AccountService::new(db.pool());
        let files = FileService::new(db.pool(), &object_store);
        let kv = MemorySessionStore::new();

        let mut session = Session::new(&kv);
        session.login(&accounts, &files, "alice").await.unwrap();

        assert_eq!(session.storage_usage().used_bytes, 0);

        files.upload("alice", &vec![0u8; 1000], "a.bin").await.unwrap();
        files.upload("alice", &vec![0u8; 500], "b.bin").await.unwrap();
        session.refresh_files(&files).await.unwrap();

        let usage = session.storage_usage();
        assert_eq!(usage.used_bytes, 1500);
        assert_eq!(usage.quota_bytes, STORAGE_QUOTA_BYTES);
        assert!(usage.used_fraction() > 0.0);
        assert!(usage.used_fraction() < 1.0);
    }

    #[test]
    fn test_used_fraction_clamped() {
        let usage = StorageUsage {
            used_bytes: u64::MAX,
            quota_bytes: STORAGE_QUOTA_BYTES,
        };
        assert_eq!(usage.used_fraction(), 1.0);
    }
}
