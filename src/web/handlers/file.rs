//! File handlers for the Web API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::{FileRecord, FileService};
use crate::web::dto::MessageResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/upload - Upload a file for a user.
///
/// Expects multipart form data with a `file` field (the content) and a
/// `username` field (the owner). The owner does not have to exist as an
/// account; ownership is the username value itself.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<FileRecord>), ApiError> {
    let mut filename: Option<String> = None;
    let mut username: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            tracing::error!("Failed to read file content: {}", e);
                            ApiError::bad_request("Failed to read file")
                        })?
                        .to_vec(),
                );
            }
            "username" => {
                username = Some(field.text().await.map_err(|e| {
                    tracing::error!("Failed to read username: {}", e);
                    ApiError::bad_request("Invalid username field")
                })?);
            }
            _ => {}
        }
    }

    let filename = filename.ok_or_else(|| ApiError::bad_request("no file provided"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("no file provided"))?;
    let username = username.ok_or_else(|| ApiError::bad_request("username is required"))?;

    let files = FileService::new(state.db.pool(), state.object_store.as_ref())
        .with_max_file_size(state.max_upload_size);
    let record = files.upload(&username, &content, &filename).await?;

    tracing::info!(
        owner = %record.owner,
        name = %record.name,
        size = record.size,
        "File uploaded"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/files/:username - List a user's files, newest first.
///
/// An unknown username yields an empty list, not an error.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<FileRecord>>, ApiError> {
    let files = FileService::new(state.db.pool(), state.object_store.as_ref());
    let records = files.list_files(&username).await?;
    Ok(Json(records))
}

/// DELETE /api/files/:id - Delete a file by id.
///
/// No ownership check: any client that knows an id can delete the file.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let files = FileService::new(state.db.pool(), state.object_store.as_ref());
    let record = files.delete_file(id).await?;

    tracing::info!(id = record.id, name = %record.name, "File deleted");

    Ok(Json(MessageResponse::new("File deleted")))
}
