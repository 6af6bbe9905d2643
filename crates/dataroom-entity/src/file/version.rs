//! File version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A historical version of a file.
///
/// Versions are append-only with monotonically increasing numbers; the
/// file's own row is the current version, older content lands here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// The file this version belongs to.
    pub file_id: Uuid,
    /// Sequential version number.
    pub version: i32,
    /// The file name at the time this version was current.
    pub name: String,
    /// Path to this version's content in storage.
    pub storage_path: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: Option<String>,
    /// The guest who uploaded this version (null for team uploads).
    pub uploaded_by_guest: Option<Uuid>,
    /// Display name of the uploader.
    pub uploaded_by_name: String,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
}
