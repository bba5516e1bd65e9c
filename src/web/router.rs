//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{delete_file, list_files, login, upload_file, AppState};

/// Slack for multipart framing on top of the configured upload ceiling.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let body_limit = app_state.max_upload_size as usize + MULTIPART_OVERHEAD;

    let api_routes = Router::new()
        .route("/login", post(login))
        .route("/upload", post(upload_file))
        .route("/files/:id", get(list_files).delete(delete_file));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create a router serving stored objects from disk.
///
/// Only applies when the public base URL is a local path; an absolute
/// URL means some other origin serves the blobs.
pub fn create_object_router(public_base_url: &str, root: &Path) -> Option<Router> {
    let base = public_base_url.trim_end_matches('/');
    if !base.starts_with('/') || base.is_empty() {
        return None;
    }

    Some(Router::new().nest_service(base, ServeDir::new(root)))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
