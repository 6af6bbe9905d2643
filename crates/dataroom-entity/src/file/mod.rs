//! File domain entities.

pub mod model;
pub mod version;

pub use model::{CreateFile, File, FileStatus, GuestFileView};
pub use version::FileVersion;
