//! Test helpers for Web API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;

use cumulus::storage::LocalObjectStore;
use cumulus::web::handlers::AppState;
use cumulus::web::router::{create_health_router, create_object_router, create_router};
use cumulus::Database;

/// Create a test server over an in-memory database and a temp object store.
///
/// The returned `TempDir` must stay alive for the duration of the test;
/// dropping it removes the stored objects.
pub async fn create_test_server() -> (TestServer, Database, TempDir) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = Arc::new(
        LocalObjectStore::new(temp_dir.path(), "test-drive", "/objects")
            .expect("Failed to create object store"),
    );
    let storage_root = store.root().to_path_buf();

    let app_state = Arc::new(AppState::new(db.clone(), store));

    let mut router = create_router(app_state).merge(create_health_router());
    if let Some(objects) = create_object_router("/objects", &storage_root) {
        router = router.merge(objects);
    }

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db, temp_dir)
}

/// Boundary used by the hand-built multipart bodies.
pub const BOUNDARY: &str = "----cumulus-test-boundary";

/// Content type header value matching [`BOUNDARY`].
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Build a multipart/form-data body with a `file` and a `username` field.
pub fn multipart_upload_body(username: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"username\"\r\n\r\n");
    body.extend_from_slice(username.as_bytes());
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    body
}

/// Build a multipart body containing only a `username` field.
pub fn multipart_username_only_body(username: &str) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"username\"\r\n\r\n");
    body.extend_from_slice(username.as_bytes());
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    body
}

/// Build a multipart body containing only a `file` field.
pub fn multipart_file_only_body(filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    body
}
