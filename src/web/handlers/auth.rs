//! Auth handlers for the Web API.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::account::AccountService;
use crate::web::dto::{LoginRequest, LoginResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/login - Establish (or create) an account by username.
///
/// Idempotent: logging in with an existing username returns the same
/// account; an unknown username creates one.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let accounts = AccountService::new(state.db.pool());
    let user = accounts.ensure_account(&req.username).await?;

    tracing::info!(username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        username: user.username,
    }))
}
