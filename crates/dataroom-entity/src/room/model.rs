//! Data room entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An NDA-gated virtual folder tree shared between an owning organization's
/// team and invited external guests.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DataRoom {
    /// Unique room identifier.
    pub id: Uuid,
    /// Room display name.
    pub name: String,
    /// Optional room description.
    pub description: Option<String>,
    /// Owning organization identifier.
    pub organization_id: Uuid,
    /// Owning organization display name.
    pub organization_name: String,
    /// Monotonically increasing NDA revision. Bumped whenever the NDA
    /// text changes; guests whose signed revision lags must re-sign.
    pub nda_version: i32,
    /// Current NDA text.
    pub nda_content: String,
    /// Room lifecycle status.
    pub status: RoomStatus,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl DataRoom {
    /// Check whether guests may currently access this room.
    pub fn is_active(&self) -> bool {
        matches!(self.status, RoomStatus::Active)
    }

    /// Read-only snapshot handed to verified guests.
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            organization_id: self.organization_id,
            organization_name: self.organization_name.clone(),
        }
    }
}

/// Room lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Open for team and guest access.
    Active,
    /// Closed; all guest access is refused.
    Archived,
}

/// Immutable room snapshot returned on successful verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummary {
    /// Room identifier.
    pub id: Uuid,
    /// Room display name.
    pub name: String,
    /// Optional room description.
    pub description: Option<String>,
    /// Owning organization identifier.
    pub organization_id: Uuid,
    /// Owning organization display name.
    pub organization_name: String,
}
