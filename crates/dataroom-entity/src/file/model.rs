//! File entity model and per-guest projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::permission::PermissionLevel;

/// A file stored in a data room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The room this file belongs to.
    pub room_id: Uuid,
    /// The folder containing this file (null = room root).
    pub folder_id: Option<Uuid>,
    /// The file name (including extension).
    pub name: String,
    /// The path within the storage provider.
    pub storage_path: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// Current version number (older versions live in `file_versions`).
    pub version: i32,
    /// Whether access is limited to an explicit allow-list of principals.
    pub is_restricted: bool,
    /// Optimistic-concurrency token for ACL writes. Bumped on every
    /// permission change; stale writers are rejected.
    pub acl_version: i32,
    /// Optional assignee (team member) for review workflows.
    pub assigned_to: Option<Uuid>,
    /// File lifecycle status (`deleted` = recycle bin).
    pub status: FileStatus,
    /// The guest who uploaded this file (null for team uploads).
    pub uploaded_by_guest: Option<Uuid>,
    /// Display name of the uploader.
    pub uploaded_by_name: String,
    /// When the file was moved to the recycle bin.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Check whether the given guest uploaded this file.
    pub fn is_uploaded_by(&self, guest_id: Uuid) -> bool {
        self.uploaded_by_guest == Some(guest_id)
    }

    /// Decide whether this file appears in a listing for the given guest.
    ///
    /// A restricted file is visible only to its uploader and to guests
    /// holding an explicit grant; it must be absent from every other
    /// guest's listing, not merely marked inaccessible.
    pub fn is_visible_to_guest(&self, guest_id: Uuid, grant: Option<PermissionLevel>) -> bool {
        if !matches!(self.status, FileStatus::Active) {
            return false;
        }
        !self.is_restricted || self.is_uploaded_by(guest_id) || grant.is_some()
    }

    /// Resolve the per-guest projection of this file.
    ///
    /// `grant` is the guest's ACL entry level, if any. The uploader always
    /// gets `edit` on their own upload.
    pub fn project_for_guest(&self, guest_id: Uuid, grant: Option<PermissionLevel>) -> GuestFileView {
        let is_own_upload = self.is_uploaded_by(guest_id);
        let permission_level = if is_own_upload || grant == Some(PermissionLevel::Edit) {
            PermissionLevel::Edit
        } else {
            PermissionLevel::View
        };

        GuestFileView {
            id: self.id,
            name: self.name.clone(),
            folder_id: self.folder_id,
            size_bytes: self.size_bytes,
            mime_type: self.mime_type.clone(),
            version: self.version,
            is_restricted: self.is_restricted,
            is_own_upload,
            permission_level,
            assigned_to: self.assigned_to,
            status: self.status,
            uploaded_by_name: self.uploaded_by_name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// File lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "file_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Live and listable.
    Active,
    /// Soft-deleted into the recycle bin.
    Deleted,
}

/// Per-guest projection of a [`File`] returned by content listings.
///
/// `is_own_upload` and `permission_level` are resolved server-side relative
/// to the requesting guest; the same file presents differently to different
/// guests. `storage_path` is deliberately not exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestFileView {
    /// File identifier.
    pub id: Uuid,
    /// File name.
    pub name: String,
    /// Containing folder (null = room root).
    pub folder_id: Option<Uuid>,
    /// Size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Current version number.
    pub version: i32,
    /// Whether the file carries an explicit allow-list.
    pub is_restricted: bool,
    /// Whether the requesting guest uploaded this file.
    pub is_own_upload: bool,
    /// The requesting guest's effective capability on this file.
    pub permission_level: PermissionLevel,
    /// Optional assignee.
    pub assigned_to: Option<Uuid>,
    /// Lifecycle status.
    pub status: FileStatus,
    /// Display name of the uploader.
    pub uploaded_by_name: String,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The room the file belongs to.
    pub room_id: Uuid,
    /// The folder to place the file in (None = root).
    pub folder_id: Option<Uuid>,
    /// The file name.
    pub name: String,
    /// The path within the storage provider.
    pub storage_path: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: Option<String>,
    /// The uploading guest.
    pub uploaded_by_guest: Option<Uuid>,
    /// Display name of the uploader.
    pub uploaded_by_name: String,
}
