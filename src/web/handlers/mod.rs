//! API handlers for the Web API.

pub mod auth;
pub mod file;

pub use auth::*;
pub use file::*;

use std::sync::Arc;

use crate::db::Database;
use crate::file::DEFAULT_MAX_FILE_SIZE;
use crate::storage::ObjectStore;

/// Shared application state.
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Blob storage backend.
    pub object_store: Arc<dyn ObjectStore>,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, object_store: Arc<dyn ObjectStore>) -> Self {
        Self {
            db,
            object_store,
            max_upload_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Set the maximum upload size.
    pub fn with_max_upload_size(mut self, max_upload_size: u64) -> Self {
        self.max_upload_size = max_upload_size;
        self
    }
}
