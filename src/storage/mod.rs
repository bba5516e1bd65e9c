//! Object storage for Cumulus.
//!
//! The object store is an external collaborator from the application's
//! point of view: it accepts a binary blob and answers with a durable
//! URL plus an opaque deletion handle. The `ObjectStore` trait is that
//! contract; `LocalObjectStore` is the shipped filesystem-backed
//! implementation.

mod local;

pub use local::LocalObjectStore;

use async_trait::async_trait;

use crate::Result;

/// Result of storing a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Durable retrieval URL for the stored blob.
    pub url: String,
    /// Opaque token required to delete the blob later.
    pub handle: String,
}

/// Contract the file workflow needs from any object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Persist `content` and return its URL and deletion handle.
    ///
    /// `original_name` is a hint only (used to keep the file extension);
    /// the store picks its own object key.
    async fn put(&self, content: &[u8], original_name: &str) -> Result<StoredObject>;

    /// Delete the blob behind `handle`.
    ///
    /// Returns `true` if the blob was deleted, `false` if it didn't exist.
    async fn delete(&self, handle: &str) -> Result<bool>;
}
