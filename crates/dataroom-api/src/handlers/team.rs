//! Room roster handler.

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::extractors::GuestSession;
use crate::state::AppState;

/// GET /api/guest/team
pub async fn list_team(
    State(state): State<AppState>,
    guest: GuestSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let roster = state.roster_service.list(&guest).await?;

    Ok(Json(serde_json::json!({ "success": true, "data": roster })))
}
