//! Folder action handlers.

pub mod service;

pub use service::FolderService;
