//! Chat message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One entry in a room's flat, append-only chat log.
///
/// Guests and team members share a single channel per room; there is no
/// threading and no edit or delete.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// The room this message belongs to.
    pub room_id: Uuid,
    /// The sending guest (null for team senders).
    pub sender_guest_id: Option<Uuid>,
    /// Sender display name.
    pub sender_name: String,
    /// Sender email address.
    pub sender_email: String,
    /// Message text.
    pub body: String,
    /// Whether the sender is a guest.
    pub is_guest: bool,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

/// Data required to append one chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessage {
    /// The room the message belongs to.
    pub room_id: Uuid,
    /// The sending guest, if any.
    pub sender_guest_id: Option<Uuid>,
    /// Sender display name.
    pub sender_name: String,
    /// Sender email address.
    pub sender_email: String,
    /// Message text.
    pub body: String,
    /// Whether the sender is a guest.
    pub is_guest: bool,
}
