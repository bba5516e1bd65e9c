//! Cumulus - a minimal multi-user file drive.
//!
//! Username-only accounts, per-user file uploads backed by a pluggable
//! object store, and a small JSON API on top.

pub mod account;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod session;
pub mod storage;
pub mod web;

pub use account::{AccountService, User, UserRepository};
pub use config::Config;
pub use db::Database;
pub use error::{CumulusError, Result};
pub use file::{FileRecord, FileRepository, FileService, NewFileRecord};
pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionState, SessionStore, StorageUsage,
    STORAGE_QUOTA_BYTES,
};
pub use storage::{LocalObjectStore, ObjectStore, StoredObject};
pub use web::WebServer;
