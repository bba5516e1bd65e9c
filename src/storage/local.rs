//! Filesystem-backed object store.
//!
//! Blobs live under `{root}/{folder}/{shard}/{uuid}.{ext}`:
//! - `folder` is the application prefix that keeps this app's blobs
//!   apart from other tenants of the store,
//! - `shard` is the first 2 characters of the UUID-based name.
//!
//! The deletion handle is the folder-relative object key, and the URL is
//! that key joined onto a configurable public base.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use super::{ObjectStore, StoredObject};
use crate::config::StorageConfig;
use crate::Result;

/// Local filesystem object store.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    /// Base directory of the store.
    root: PathBuf,
    /// Application folder prefix inside the store.
    folder: String,
    /// Public base URL objects are served under.
    public_base_url: String,
}

impl LocalObjectStore {
    /// Create a new store rooted at `root`.
    ///
    /// The root and application folder are created if they don't exist.
    pub fn new(
        root: impl Into<PathBuf>,
        folder: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Result<Self> {
        let root = root.into();
        let folder = folder.into();
        std::fs::create_dir_all(root.join(&folder))?;

        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            root,
            folder,
            public_base_url,
        })
    }

    /// Create a store from the storage configuration.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        Self::new(&config.root, &config.folder, &config.public_base_url)
    }

    /// Get the base path of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full filesystem path for an object key.
    pub fn object_path(&self, handle: &str) -> PathBuf {
        self.root.join(handle)
    }

    /// Check if an object exists.
    pub fn exists(&self, handle: &str) -> bool {
        self.object_path(handle).exists()
    }

    /// Load an object's content.
    pub async fn load(&self, handle: &str) -> Result<Vec<u8>> {
        match tokio::fs::read(self.object_path(handle)).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(crate::CumulusError::NotFound(format!("object {handle}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get the shard directory name for a stored name.
    fn shard(stored_name: &str) -> &str {
        if stored_name.len() >= 2 {
            &stored_name[..2]
        } else {
            stored_name
        }
    }

    /// Extract the file extension from a filename.
    ///
    /// Returns "bin" if no extension is found.
    fn extract_extension(filename: &str) -> &str {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("bin")
    }

    /// Generate a new UUID-based object key under the application folder.
    fn generate_key(&self, original_name: &str) -> String {
        let uuid = Uuid::new_v4();
        let ext = Self::extract_extension(original_name);
        let stored_name = format!("{uuid}.{ext}");
        let shard = Self::shard(&stored_name);
        format!("{}/{}/{}", self.folder, shard, stored_name)
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, content: &[u8], original_name: &str) -> Result<StoredObject> {
        let key = self.generate_key(original_name);
        let path = self.object_path(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&path, content).await?;

        Ok(StoredObject {
            url: self.url_for(&key),
            handle: key,
        })
    }

    async fn delete(&self, handle: &str) -> Result<bool> {
        match tokio::fs::remove_file(self.object_path(handle)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
