//! JWT claims for the guest session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload embedded in every guest session token.
///
/// The token shortcuts per-call passcode hashing; it does not replace
/// authorization. Every operation still re-checks the invite, the room,
/// and the NDA revision against the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestSessionClaims {
    /// Subject — the guest invite ID.
    pub sub: Uuid,
    /// The room this session is scoped to.
    pub room: Uuid,
    /// Guest email for convenience.
    pub email: String,
    /// NDA revision the guest had signed at issuance.
    pub nda: i32,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl GuestSessionClaims {
    /// Returns the guest invite ID from the subject claim.
    pub fn guest_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the room ID.
    pub fn room_id(&self) -> Uuid {
        self.room
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
