//! Guest invite repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::guest::{GuestInvite, GuestStatus};

/// Repository for guest invite lookups and NDA signature updates.
#[derive(Debug, Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Create a new guest repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a guest invite by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<GuestInvite>> {
        sqlx::query_as::<_, GuestInvite>("SELECT * FROM guest_invites WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invite", e))
    }

    /// Find all non-revoked invites for an email address, across rooms.
    ///
    /// The passcode disambiguates when one email is invited to several
    /// rooms, so callers verify the hash against each candidate.
    pub async fn find_usable_by_email(&self, email: &str) -> AppResult<Vec<GuestInvite>> {
        sqlx::query_as::<_, GuestInvite>(
            "SELECT * FROM guest_invites WHERE LOWER(email) = LOWER($1) AND status != 'revoked' \
             ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invites", e))
    }

    /// List active (non-revoked) invites for a room's roster display.
    pub async fn find_by_room(&self, room_id: Uuid) -> AppResult<Vec<GuestInvite>> {
        sqlx::query_as::<_, GuestInvite>(
            "SELECT * FROM guest_invites WHERE room_id = $1 AND status != 'revoked' \
             ORDER BY display_name ASC",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list invites", e))
    }

    /// Mark an invite as active after its first successful verification.
    pub async fn mark_active(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE guest_invites SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'invited'",
        )
        .bind(id)
        .bind(GuestStatus::Active)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to activate invite", e))?;
        Ok(())
    }

    /// Record an NDA signature for the given NDA revision.
    pub async fn record_nda_signature(
        &self,
        id: Uuid,
        nda_version: i32,
        signer_name: &str,
        signed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE guest_invites SET nda_signed_version = $2, nda_signed_name = $3, \
             nda_signed_at = $4, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(nda_version)
        .bind(signer_name)
        .bind(signed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record NDA signature", e)
        })?;
        Ok(())
    }
}
