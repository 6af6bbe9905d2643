//! Data room repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::room::DataRoom;

/// Repository for data room lookups.
///
/// Rooms are created and administered by the team-side platform; the guest
/// broker only ever reads them.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DataRoom>> {
        sqlx::query_as::<_, DataRoom>("SELECT * FROM data_rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }
}
