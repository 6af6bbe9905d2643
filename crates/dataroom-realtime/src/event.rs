//! Room event vocabulary for the realtime feed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dataroom_entity::message::Message;

/// An event broadcast to every connected participant of a room.
///
/// Events are intentionally coarse: clients respond to `ContentChanged`
/// and `AclChanged` with a full content re-fetch at their current folder
/// rather than patching local state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    /// Files or folders changed somewhere in the room.
    ContentChanged {
        /// The folder the change happened in (None = room root).
        folder_id: Option<Uuid>,
    },
    /// A file's restriction flag or grant list changed.
    AclChanged {
        /// The affected file.
        file_id: Uuid,
    },
    /// A chat message was posted.
    MessageCreated {
        /// The new message.
        message: Message,
    },
}
