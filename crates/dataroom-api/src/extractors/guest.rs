//! `GuestSession` extractor — pulls the session token from the
//! Authorization header, validates it, and re-checks the guest's standing
//! against the database.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dataroom_core::error::AppError;
use dataroom_service::context::GuestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted guest context available in authenticated handlers.
///
/// Extraction fails with `NDA_UPDATED` when the room's NDA changed after
/// the token was issued, which is how the resign flow reaches a guest
/// mid-session.
#[derive(Debug, Clone)]
pub struct GuestSession(pub GuestContext);

impl std::ops::Deref for GuestSession {
    type Target = GuestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for GuestSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.token_codec.verify(token)?;

        // The token only proves who is asking. Standing — invite alive,
        // room active, NDA current — is re-checked per request.
        let ctx = state.session_service.authorize(&claims).await?;

        Ok(GuestSession(ctx))
    }
}
