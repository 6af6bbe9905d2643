//! Room chat handlers.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::{MessagesQuery, SendMessageRequest};
use crate::error::ApiError;
use crate::extractors::GuestSession;
use crate::handlers::validate;
use crate::state::AppState;

/// GET /api/guest/messages
pub async fn list_messages(
    State(state): State<AppState>,
    guest: GuestSession,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let messages = state.chat_service.list(&guest, query.since).await?;

    Ok(Json(serde_json::json!({ "success": true, "data": messages })))
}

/// POST /api/guest/messages
pub async fn send_message(
    State(state): State<AppState>,
    guest: GuestSession,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;

    let message = state.chat_service.send(&guest, &req.message).await?;

    Ok(Json(serde_json::json!({ "success": true, "data": message })))
}
