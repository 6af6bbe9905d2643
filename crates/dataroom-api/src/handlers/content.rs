//! Content gateway handler.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::ContentQuery;
use crate::error::ApiError;
use crate::extractors::GuestSession;
use crate::state::AppState;

/// GET /api/guest/content
///
/// Fresh authorize-and-list round trip on every navigation; the optional
/// `seq` parameter is echoed so racing responses can be ordered client
/// side.
pub async fn list_content(
    State(state): State<AppState>,
    guest: GuestSession,
    Query(query): Query<ContentQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let listing = state
        .content_service
        .list(&guest, query.folder_id, query.seq)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": listing })))
}
