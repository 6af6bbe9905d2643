//! # dataroom-storage
//!
//! File storage for room content. Implements the
//! [`dataroom_core::traits::storage::StorageProvider`] trait for the local
//! filesystem and exposes a manager that owns the active provider.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
