//! Chat message repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::message::{CreateMessage, Message};

/// Repository over a room's append-only chat log.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a room's messages in chronological order, optionally only
    /// those created after `since`.
    pub async fn find_by_room(
        &self,
        room_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE room_id = $1 \
             AND ($2::timestamptz IS NULL OR created_at > $2) \
             ORDER BY created_at ASC",
        )
        .bind(room_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }

    /// Append one message.
    pub async fn create(&self, message: &CreateMessage) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (room_id, sender_guest_id, sender_name, sender_email, body, \
             is_guest) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(message.room_id)
        .bind(message.sender_guest_id)
        .bind(&message.sender_name)
        .bind(&message.sender_email)
        .bind(&message.body)
        .bind(message.is_guest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create message", e))
    }
}
