//! File repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::file::{CreateFile, File, FileVersion};

/// Repository for file CRUD, soft deletion, and version history.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID (any status).
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List active files in a folder within a room (None = room root).
    pub async fn find_in_folder(
        &self,
        room_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE room_id = $1 AND status = 'active' \
             AND (($2::uuid IS NULL AND folder_id IS NULL) OR folder_id = $2) \
             ORDER BY name ASC",
        )
        .bind(room_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Find an active file by folder and name (for upload-as-new-version).
    pub async fn find_by_folder_and_name(
        &self,
        room_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE room_id = $1 AND status = 'active' \
             AND (($2::uuid IS NULL AND folder_id IS NULL) OR folder_id = $2) \
             AND name = $3",
        )
        .bind(room_id)
        .bind(folder_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file by name", e))
    }

    /// Create a file record.
    pub async fn create(&self, file: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (room_id, folder_id, name, storage_path, size_bytes, mime_type, \
             uploaded_by_guest, uploaded_by_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(file.room_id)
        .bind(file.folder_id)
        .bind(&file.name)
        .bind(&file.storage_path)
        .bind(file.size_bytes)
        .bind(&file.mime_type)
        .bind(file.uploaded_by_guest)
        .bind(&file.uploaded_by_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// Replace a file's content with a new version.
    ///
    /// Archives the current row into `file_versions` and updates the file
    /// in one transaction, so the history never skips a number.
    pub async fn supersede(
        &self,
        current: &File,
        new_storage_path: &str,
        new_size_bytes: i64,
        new_mime_type: Option<&str>,
        uploader_guest: Option<Uuid>,
        uploader_name: &str,
    ) -> AppResult<File> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin tx", e))?;

        sqlx::query(
            "INSERT INTO file_versions (file_id, version, name, storage_path, size_bytes, \
             mime_type, uploaded_by_guest, uploaded_by_name, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(current.id)
        .bind(current.version)
        .bind(&current.name)
        .bind(&current.storage_path)
        .bind(current.size_bytes)
        .bind(&current.mime_type)
        .bind(current.uploaded_by_guest)
        .bind(&current.uploaded_by_name)
        .bind(current.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to archive version", e))?;

        let updated = sqlx::query_as::<_, File>(
            "UPDATE files SET storage_path = $2, size_bytes = $3, mime_type = $4, \
             version = version + 1, uploaded_by_guest = $5, uploaded_by_name = $6, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(current.id)
        .bind(new_storage_path)
        .bind(new_size_bytes)
        .bind(new_mime_type)
        .bind(uploader_guest)
        .bind(uploader_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to supersede file", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit tx", e))?;

        Ok(updated)
    }

    /// Move a file to the recycle bin (soft delete).
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE files SET status = 'deleted', deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(())
    }

    /// List a file's archived versions, newest first.
    pub async fn find_versions(&self, file_id: Uuid) -> AppResult<Vec<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = $1 ORDER BY version DESC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }
}
