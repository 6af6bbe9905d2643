//! Activity feed handler.

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::extractors::GuestSession;
use crate::state::AppState;

/// GET /api/guest/activity
///
/// Full feed, newest first, no pagination. Entries carry both the stored
/// action slug and a display label; unknown slugs humanize instead of
/// erroring.
pub async fn list_activity(
    State(state): State<AppState>,
    guest: GuestSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = state.activity_service.list(&guest).await?;

    let data: Vec<serde_json::Value> = entries
        .iter()
        .map(|entry| {
            let mut value = serde_json::to_value(entry).unwrap_or_default();
            if let Some(map) = value.as_object_mut() {
                map.insert(
                    "action_label".to_string(),
                    serde_json::Value::String(entry.action().label()),
                );
            }
            value
        })
        .collect();

    Ok(Json(serde_json::json!({ "success": true, "data": data })))
}
