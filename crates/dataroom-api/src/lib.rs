//! # dataroom-api
//!
//! HTTP surface of the guest access broker: the axum router, request
//! DTOs, the `GuestSession` extractor, error-to-HTTP mapping, and all
//! handlers.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
