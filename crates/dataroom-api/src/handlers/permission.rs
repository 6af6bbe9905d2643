//! Per-file ACL handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use dataroom_entity::permission::CreateAclEntry;

use crate::dto::request::SetPermissionsRequest;
use crate::error::ApiError;
use crate::extractors::GuestSession;
use crate::state::AppState;

/// GET /api/guest/files/:id/permissions — uploader only.
pub async fn get_permissions(
    State(state): State<AppState>,
    guest: GuestSession,
    Path(file_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let permissions = state
        .permission_service
        .get_permissions(&guest, file_id)
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": permissions }),
    ))
}

/// PUT /api/guest/files/:id/permissions — replace the full grant set.
///
/// Requires the `acl_version` read alongside the grants; a stale version
/// is rejected with `CONFLICT` so concurrent edits are detected instead of
/// silently lost.
pub async fn set_permissions(
    State(state): State<AppState>,
    guest: GuestSession,
    Path(file_id): Path<Uuid>,
    Json(req): Json<SetPermissionsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = req
        .entries
        .iter()
        .map(|e| {
            Ok(CreateAclEntry {
                principal_type: e.principal_type.parse()?,
                principal_id: e.reference_id,
                level: e.permission_level.parse()?,
            })
        })
        .collect::<Result<Vec<_>, dataroom_core::AppError>>()?;

    let acl_version = state
        .permission_service
        .set_permissions(
            &guest,
            file_id,
            dataroom_service::permission::SetPermissionsRequest {
                is_restricted: req.is_restricted,
                entries,
                acl_version: req.acl_version,
            },
        )
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "acl_version": acl_version } }),
    ))
}
