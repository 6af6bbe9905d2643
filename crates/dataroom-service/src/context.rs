//! Per-request guest context.

use uuid::Uuid;

/// Identity attached to every authenticated guest operation.
///
/// Constructed exclusively by the session layer after checking, against
/// the database, that the invite is live, the room is active, and the
/// guest's NDA signature covers the room's current NDA revision.
#[derive(Debug, Clone)]
pub struct GuestContext {
    /// The guest invite ID.
    pub guest_id: Uuid,
    /// The room the session is scoped to.
    pub room_id: Uuid,
    /// Guest email address.
    pub email: String,
    /// Guest display name.
    pub display_name: String,
}
