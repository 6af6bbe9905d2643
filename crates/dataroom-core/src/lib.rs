//! # dataroom-core
//!
//! Core crate for Vantage Dataroom. Contains configuration schemas, the
//! unified error system, and the storage provider trait.
//!
//! This crate has **no** internal dependencies on other Dataroom crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
