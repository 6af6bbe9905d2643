//! Team member roster entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Read-only projection of a team member participating in a room.
///
/// Used to populate ACL pickers and the active-team display; never mutated
/// by the guest broker.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    /// Unique member identifier.
    pub id: Uuid,
    /// The room this membership belongs to.
    pub room_id: Uuid,
    /// Member display name.
    pub user_name: String,
    /// Member email address.
    pub email: String,
    /// Role label within the owning organization (display only).
    pub role: String,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}
