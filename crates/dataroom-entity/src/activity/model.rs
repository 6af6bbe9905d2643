//! Activity log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::action::ActivityAction;

/// An immutable activity log entry scoped to one room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The room the action occurred in.
    pub room_id: Uuid,
    /// Display name of the actor.
    pub actor_name: String,
    /// Email of the actor.
    pub actor_email: String,
    /// Whether the actor is a guest.
    pub is_guest: bool,
    /// Action slug (see [`ActivityAction`]).
    pub action: String,
    /// Additional details about the action (JSON).
    pub details: Option<serde_json::Value>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    /// Parse the stored slug into the action vocabulary.
    pub fn action(&self) -> ActivityAction {
        ActivityAction::from(self.action.clone())
    }
}

/// Data required to append one activity entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityEntry {
    /// The room the action occurred in.
    pub room_id: Uuid,
    /// Display name of the actor.
    pub actor_name: String,
    /// Email of the actor.
    pub actor_email: String,
    /// Whether the actor is a guest.
    pub is_guest: bool,
    /// The action performed.
    pub action: ActivityAction,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}
