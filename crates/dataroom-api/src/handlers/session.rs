//! Guest verification and NDA resign handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{NdaDetailsRequest, SignNdaRequest, VerifyRequest};
use crate::error::ApiError;
use crate::handlers::validate;
use crate::state::AppState;

/// POST /api/guest/verify
///
/// Credentials in, browsing session out — or the distinguished
/// `NDA_UPDATED` error that routes the client into the resign flow.
pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;

    let session = state
        .session_service
        .verify(&req.email, &req.passcode, req.folder_id)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": session })))
}

/// POST /api/guest/nda
///
/// Credential-keyed NDA lookup for the resign screen. Succeeds even while
/// the guest's signature is outdated.
pub async fn nda_details(
    State(state): State<AppState>,
    Json(req): Json<NdaDetailsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;

    let details = state
        .session_service
        .nda_details(&req.email, &req.passcode)
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "data": details })))
}

/// POST /api/guest/nda/sign
pub async fn sign_nda(
    State(state): State<AppState>,
    Json(req): Json<SignNdaRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validate(&req)?;

    state
        .session_service
        .sign_nda(&req.email, &req.passcode, &req.signer_name)
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "NDA signed" } }),
    ))
}
