//! File metadata types and repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::Result;

/// Metadata for a stored file.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct FileRecord {
    /// Unique file ID, assigned by the store.
    pub id: i64,
    /// Original filename as supplied by the uploader.
    pub name: String,
    /// File size in bytes.
    pub size: i64,
    /// Durable retrieval URL in the object store.
    pub storage_url: String,
    /// Opaque token required to delete the blob. Not shown to end users.
    #[serde(skip_serializing)]
    pub storage_handle: String,
    /// Owning username (by value; no referential integrity).
    pub owner: String,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
}

/// Data for creating a new file record.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    /// Original filename.
    pub name: String,
    /// File size in bytes.
    pub size: i64,
    /// Durable retrieval URL.
    pub storage_url: String,
    /// Deletion handle for the blob.
    pub storage_handle: String,
    /// Owning username.
    pub owner: String,
}

impl NewFileRecord {
    /// Create a new NewFileRecord.
    pub fn new(
        name: impl Into<String>,
        size: i64,
        storage_url: impl Into<String>,
        storage_handle: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            storage_url: storage_url.into(),
            storage_handle: storage_handle.into(),
            owner: owner.into(),
        }
    }
}

/// Repository for file metadata operations.
pub struct FileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new file record.
    pub async fn create(&self, file: &NewFileRecord) -> Result<FileRecord> {
        let result = sqlx::query(
            "INSERT INTO files (name, size, storage_url, storage_handle, owner)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&file.name)
        .bind(file.size)
        .bind(&file.storage_url)
        .bind(&file.storage_handle)
        .bind(&file.owner)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| crate::CumulusError::NotFound("file".to_string()))
    }

    /// Get a file record by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FileRecord>> {
        let record = sqlx::query_as::<_, FileRecord>(
            "SELECT id, name, size, storage_url, storage_handle, owner, uploaded_at
             FROM files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// List files by owner, newest first.
    pub async fn list_by_owner(&self, owner: &str) -> Result<Vec<FileRecord>> {
        let records = sqlx::query_as::<_, FileRecord>(
            "SELECT id, name, size, storage_url, storage_handle, owner, uploaded_at
             FROM files WHERE owner = ? ORDER BY uploaded_at DESC, id DESC",
        )
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    /// Delete a file record by ID.
    ///
    /// Returns `true` if a record was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count files for an owner.
    pub async fn count_by_owner(&self, owner: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE owner = ?")
            .bind(owner)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Total bytes stored for an owner.
    pub async fn total_size_by_owner(&self, owner: &str) -> Result<i64> {
        let size: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(size), 0) FROM files WHERE owner = ?")
                .bind(owner)
                .fetch_one(self.pool)
                .await?;
        Ok(size)
    }
}
