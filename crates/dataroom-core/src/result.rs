//! Application result alias.

use crate::error::AppError;

/// Result alias used throughout the application.
pub type AppResult<T> = Result<T, AppError>;
