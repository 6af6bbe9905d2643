//! Activity log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::activity::{ActivityEntry, CreateActivityEntry};

/// Repository over a room's append-only activity log.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a room's activity, newest first.
    pub async fn find_by_room(&self, room_id: Uuid) -> AppResult<Vec<ActivityEntry>> {
        sqlx::query_as::<_, ActivityEntry>(
            "SELECT * FROM activity_log WHERE room_id = $1 ORDER BY created_at DESC",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list activity", e))
    }

    /// Append one activity entry.
    pub async fn create(&self, entry: &CreateActivityEntry) -> AppResult<ActivityEntry> {
        sqlx::query_as::<_, ActivityEntry>(
            "INSERT INTO activity_log (room_id, actor_name, actor_email, is_guest, action, \
             details) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(entry.room_id)
        .bind(&entry.actor_name)
        .bind(&entry.actor_email)
        .bind(entry.is_guest)
        .bind(entry.action.as_slug())
        .bind(&entry.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record activity", e))
    }
}
