//! File action handlers: upload, download, delete, versions.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::Response;
use uuid::Uuid;

use dataroom_auth::token::download::DownloadMode;
use dataroom_core::error::AppError;

use crate::dto::request::DownloadQuery;
use crate::error::ApiError;
use crate::extractors::GuestSession;
use crate::state::AppState;

/// POST /api/guest/files — multipart upload of a single file.
///
/// Parts: an optional `folder_id` text field followed by one `file` part.
/// Batches are client-side loops; each request stands alone so partial
/// success across a batch is expected.
pub async fn upload_file(
    State(state): State<AppState>,
    guest: GuestSession,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut folder_id: Option<Uuid> = None;
    let mut uploaded = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed upload: {e}")))?
    {
        match field.name() {
            Some("folder_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Malformed folder_id: {e}")))?;
                if !text.is_empty() {
                    folder_id = Some(text.parse().map_err(|_| {
                        AppError::validation(format!("Invalid folder_id: '{text}'"))
                    })?);
                }
            }
            Some("file") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::validation("File part is missing a filename"))?;
                let mime_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Upload interrupted: {e}")))?;

                uploaded = Some(
                    state
                        .upload_service
                        .upload(&guest, folder_id, &name, mime_type, data)
                        .await?,
                );
            }
            _ => {}
        }
    }

    let file = uploaded.ok_or_else(|| AppError::validation("No file part in upload"))?;

    Ok(Json(serde_json::json!({ "success": true, "data": file })))
}

/// GET /api/guest/files/:id/download — issue a time-limited URL.
pub async fn download_file(
    State(state): State<AppState>,
    guest: GuestSession,
    Path(file_id): Path<Uuid>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mode = match query.mode.as_deref() {
        Some("preview") => DownloadMode::Preview,
        Some("final") | None => DownloadMode::Final,
        Some(other) => {
            return Err(ApiError(AppError::validation(format!(
                "Invalid download mode: '{other}'"
            ))));
        }
    };

    let issued = state.download_service.issue(&guest, file_id, mode).await?;

    Ok(Json(serde_json::json!({ "success": true, "data": issued })))
}

/// GET /api/guest/download/:token — fetch bytes behind a signed URL.
///
/// No session required: the token is the authorization and expires on its
/// own.
pub async fn fetch_download(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let (claims, stream) = state.download_service.fetch(&token).await?;

    let disposition = match claims.mode {
        DownloadMode::Preview => format!("inline; filename=\"{}\"", sanitize_filename(&claims.name)),
        DownloadMode::Final => {
            format!("attachment; filename=\"{}\"", sanitize_filename(&claims.name))
        }
    };

    Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError(AppError::internal(format!("Failed to build response: {e}"))))
}

/// DELETE /api/guest/files/:id — recycle-bin soft delete, uploader only.
pub async fn delete_file(
    State(state): State<AppState>,
    guest: GuestSession,
    Path(file_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.file_service.delete(&guest, file_id).await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "File moved to recycle bin" } }),
    ))
}

/// GET /api/guest/files/:id/versions
pub async fn list_versions(
    State(state): State<AppState>,
    guest: GuestSession,
    Path(file_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let history = state.file_service.versions(&guest, file_id).await?;

    Ok(Json(serde_json::json!({ "success": true, "data": history })))
}

/// POST /api/guest/files/:id/versions/:version/restore
///
/// Always answers `NOT_AVAILABLE` for guests (never a permission error).
pub async fn restore_version(
    State(state): State<AppState>,
    guest: GuestSession,
    Path((file_id, version)): Path<(Uuid, i32)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .file_service
        .restore_version(&guest, file_id, version)
        .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/guest/files/:id/versions/:version
pub async fn delete_version(
    State(state): State<AppState>,
    guest: GuestSession,
    Path((file_id, version)): Path<(Uuid, i32)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .file_service
        .delete_version(&guest, file_id, version)
        .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Strip characters that would break the Content-Disposition header.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' | '\r' | '\n' => '_',
            c => c,
        })
        .collect()
}
