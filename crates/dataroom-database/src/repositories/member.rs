//! Team member roster repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::member::Member;

/// Read-only repository over the team roster projection.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the team members of a room.
    pub async fn find_by_room(&self, room_id: Uuid) -> AppResult<Vec<Member>> {
        sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE room_id = $1 ORDER BY user_name ASC",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }
}
