//! File service: orchestrates the blob store and the metadata store.

use sqlx::SqlitePool;
use tracing::warn;

use super::metadata::{FileRecord, FileRepository, NewFileRecord};
use super::DEFAULT_MAX_FILE_SIZE;
use crate::storage::ObjectStore;
use crate::{CumulusError, Result};

/// Service for the upload / list / delete workflow.
pub struct FileService<'a> {
    pool: &'a SqlitePool,
    store: &'a dyn ObjectStore,
    max_file_size: u64,
}

impl<'a> FileService<'a> {
    /// Create a new FileService.
    pub fn new(pool: &'a SqlitePool, store: &'a dyn ObjectStore) -> Self {
        Self {
            pool,
            store,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Create a new FileService with a custom max file size.
    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Get the configured max file size.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Upload a file.
    ///
    /// Two-phase: the blob is written to the object store first, then
    /// the metadata record is persisted. If the metadata insert fails
    /// the blob is compensated with a best-effort delete so it doesn't
    /// linger as an orphan.
    ///
    /// # Returns
    /// The persisted file record.
    pub async fn upload(
        &self,
        owner: &str,
        content: &[u8],
        original_name: &str,
    ) -> Result<FileRecord> {
        if owner.is_empty() {
            return Err(CumulusError::Validation("owner is required".to_string()));
        }
        if content.is_empty() {
            return Err(CumulusError::Validation("no file provided".to_string()));
        }
        if content.len() as u64 > self.max_file_size {
            let max_mb = self.max_file_size / 1024 / 1024;
            return Err(CumulusError::Validation(format!(
                "file too large (max {max_mb}MB)"
            )));
        }

        let stored = self.store.put(content, original_name).await?;

        let new_record = NewFileRecord::new(
            original_name,
            content.len() as i64,
            &stored.url,
            &stored.handle,
            owner,
        );

        let repo = FileRepository::new(self.pool);
        match repo.create(&new_record).await {
            Ok(record) => Ok(record),
            Err(e) => {
                // Compensate the blob write so it doesn't become an orphan
                if let Err(del_err) = self.store.delete(&stored.handle).await {
                    warn!(
                        handle = %stored.handle,
                        error = %del_err,
                        "Failed to clean up blob after metadata failure"
                    );
                }
                Err(e)
            }
        }
    }

    /// List all files owned by `owner`, newest first.
    ///
    /// An owner with no files yields an empty vec, not an error.
    pub async fn list_files(&self, owner: &str) -> Result<Vec<FileRecord>> {
        let repo = FileRepository::new(self.pool);
        repo.list_by_owner(owner).await
    }

    /// Delete a file by ID.
    ///
    /// The blob is deleted first; a blob-deletion failure is logged but
    /// does not block removal of the metadata record, leaving at worst
    /// an orphaned blob.
    ///
    /// # Returns
    /// The deleted record, or `CumulusError::NotFound` for an unknown ID.
    pub async fn delete_file(&self, id: i64) -> Result<FileRecord> {
        let repo = FileRepository::new(self.pool);

        let record = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| CumulusError::NotFound("file".to_string()))?;

        match self.store.delete(&record.storage_handle).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(handle = %record.storage_handle, "Blob already gone during delete");
            }
            Err(e) => {
                warn!(
                    handle = %record.storage_handle,
                    error = %e,
                    "Blob deletion failed; removing metadata anyway"
                );
            }
        }

        repo.delete(id).await?;

        Ok(record)
    }
}
