//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health — liveness probe.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/health/detailed — checks the database and storage backends.
pub async fn detailed_health(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();

    let storage = state.storage_manager.health_check().await.unwrap_or(false);

    let status = if database && storage { "ok" } else { "degraded" };

    Ok(Json(serde_json::json!({
        "status": status,
        "checks": {
            "database": database,
            "storage": storage,
            "realtime_rooms": state.realtime.active_rooms(),
        }
    })))
}
