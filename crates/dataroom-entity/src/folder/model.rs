//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a room's file hierarchy.
///
/// Folders form a tree rooted at `parent_id = NULL`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The room this folder belongs to.
    pub room_id: Uuid,
    /// Parent folder ID (null for root-level folders).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
    /// The guest who created this folder (null for team-created folders).
    pub created_by_guest: Option<Uuid>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this folder sits at the root of the room.
    pub fn is_root_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The room the folder belongs to.
    pub room_id: Uuid,
    /// Parent folder (None for root level).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
    /// The creating guest, if guest-created.
    pub created_by_guest: Option<Uuid>,
}
