//! Folder action handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::CreateFolderRequest;
use crate::error::ApiError;
use crate::extractors::GuestSession;
use crate::handlers::validate;
use crate::state::AppState;

/// POST /api/guest/folders
pub async fn create_folder(
    State(state): State<AppState>,
    guest: GuestSession,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;

    let folder = state
        .folder_service
        .create(&guest, &req.name, req.parent_id)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// DELETE /api/guest/folders/:id — creator-only, empty folders only.
pub async fn delete_folder(
    State(state): State<AppState>,
    guest: GuestSession,
    Path(folder_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.folder_service.delete(&guest, folder_id).await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Folder deleted" } }),
    ))
}
