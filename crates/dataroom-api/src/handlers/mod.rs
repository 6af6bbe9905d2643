//! HTTP request handlers, one module per domain.

pub mod activity;
pub mod content;
pub mod file;
pub mod folder;
pub mod health;
pub mod message;
pub mod permission;
pub mod session;
pub mod team;
pub mod ws;

use dataroom_core::error::AppError;
use validator::Validate;

use crate::error::ApiError;

/// Runs derive-based validation and surfaces the first failure message.
pub(crate) fn validate(req: &impl Validate) -> Result<(), ApiError> {
    req.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        ApiError(AppError::validation(message))
    })
}
