//! File lifecycle module for Cumulus.
//!
//! Covers the upload / list / delete workflow: blobs go to the object
//! store, metadata goes to the files table, and the two are tied
//! together by the stored deletion handle.

mod metadata;
mod service;

pub use metadata::{FileRecord, FileRepository, NewFileRecord};
pub use service::FileService;

/// Default maximum file size (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;
