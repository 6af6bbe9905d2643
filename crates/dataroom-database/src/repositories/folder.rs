//! Folder repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::folder::{CreateFolder, Folder};

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List the child folders of a parent within a room (None = root level).
    pub async fn find_children(
        &self,
        room_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE room_id = $1 \
             AND (($2::uuid IS NULL AND parent_id IS NULL) OR parent_id = $2) \
             ORDER BY name ASC",
        )
        .bind(room_id)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// List every folder in a room (for move/pick UIs without N+1 calls).
    pub async fn find_by_room(&self, room_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE room_id = $1 ORDER BY name ASC",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list room folders", e))
    }

    /// Get the ancestor chain from root down to the given folder, inclusive.
    pub async fn find_ancestry(&self, folder_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "WITH RECURSIVE ancestors AS ( \
                SELECT f.*, 0 AS hops FROM folders f WHERE f.id = $1 \
                UNION ALL \
                SELECT f.*, a.hops + 1 FROM folders f \
                INNER JOIN ancestors a ON f.id = a.parent_id \
             ) SELECT id, room_id, parent_id, name, created_by_guest, created_at, updated_at \
             FROM ancestors ORDER BY hops DESC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve ancestry", e))
    }

    /// Find a sibling folder by name (for duplicate checking).
    pub async fn find_by_parent_and_name(
        &self,
        room_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE room_id = $1 \
             AND (($2::uuid IS NULL AND parent_id IS NULL) OR parent_id = $2) \
             AND name = $3",
        )
        .bind(room_id)
        .bind(parent_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find folder by name", e)
        })
    }

    /// Create a folder.
    pub async fn create(&self, folder: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (room_id, parent_id, name, created_by_guest) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(folder.room_id)
        .bind(folder.parent_id)
        .bind(&folder.name)
        .bind(folder.created_by_guest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    /// Count a folder's live contents (subfolders plus active files).
    pub async fn count_contents(&self, folder_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT (SELECT COUNT(*) FROM folders WHERE parent_id = $1) + \
                    (SELECT COUNT(*) FROM files WHERE folder_id = $1 AND status = 'active')",
        )
        .bind(folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count contents", e))
    }

    /// Delete a folder.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;
        Ok(())
    }
}
