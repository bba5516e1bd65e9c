//! Web API for Cumulus.
//!
//! HTTP surface over the account and file services:
//!
//! - `POST /api/login` - establish (or create) an account
//! - `POST /api/upload` - multipart file upload
//! - `GET /api/files/:username` - list a user's files
//! - `DELETE /api/files/:id` - delete a file
//! - `GET /health` - liveness probe
//! - `GET /objects/...` - stored blobs, when served locally

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::{ApiError, ErrorCode};
pub use handlers::AppState;
pub use router::{create_health_router, create_object_router, create_router};
pub use server::WebServer;
