//! Guest invite entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An external, non-account-holding participant invited to one data room.
///
/// Guests authenticate per room with their email plus a one-time passcode;
/// the passcode is stored Argon2id-hashed and never returned by any API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GuestInvite {
    /// Unique invite identifier.
    pub id: Uuid,
    /// The room this invite grants access to.
    pub room_id: Uuid,
    /// Guest email address (unique per room).
    pub email: String,
    /// Guest display name.
    pub display_name: String,
    /// Argon2id hash of the one-time passcode.
    #[serde(skip_serializing)]
    pub passcode_hash: String,
    /// NDA revision this guest last signed (null = never signed).
    pub nda_signed_version: Option<i32>,
    /// When the guest last signed the NDA.
    pub nda_signed_at: Option<DateTime<Utc>>,
    /// Name the guest typed when signing.
    pub nda_signed_name: Option<String>,
    /// Invite lifecycle status.
    pub status: GuestStatus,
    /// When the invite was created.
    pub created_at: DateTime<Utc>,
    /// When the invite was last updated.
    pub updated_at: DateTime<Utc>,
}

impl GuestInvite {
    /// Check whether this invite may be used at all.
    pub fn is_usable(&self) -> bool {
        !matches!(self.status, GuestStatus::Revoked)
    }

    /// Check whether the guest's signature covers the given NDA revision.
    pub fn has_signed(&self, nda_version: i32) -> bool {
        self.nda_signed_version == Some(nda_version)
    }
}

/// Guest invite lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "guest_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    /// Invited but has not yet verified.
    Invited,
    /// Has verified at least once.
    Active,
    /// Access withdrawn; all operations refused.
    Revoked,
}
