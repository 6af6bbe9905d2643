//! Custom axum extractors.

pub mod guest;

pub use guest::GuestSession;
