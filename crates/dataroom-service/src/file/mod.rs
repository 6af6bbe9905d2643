//! File action handlers: upload, download, delete, version history.

pub mod download;
pub mod service;
pub mod upload;

pub use download::{DownloadService, IssuedDownload};
pub use service::{FileService, VersionHistory};
pub use upload::UploadService;
