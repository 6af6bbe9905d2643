//! ACL entry repository implementation.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::permission::{CreateAclEntry, FileAclEntry, PermissionLevel, PrincipalType};

/// Repository for per-file ACL entries.
#[derive(Debug, Clone)]
pub struct AclRepository {
    pool: PgPool,
}

impl AclRepository {
    /// Create a new ACL repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all grant entries for a file.
    pub async fn find_by_file(&self, file_id: Uuid) -> AppResult<Vec<FileAclEntry>> {
        sqlx::query_as::<_, FileAclEntry>(
            "SELECT * FROM file_acl_entries WHERE file_id = $1 ORDER BY created_at ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list ACL entries", e))
    }

    /// Find one guest's grant on a file, if any.
    pub async fn find_guest_grant(
        &self,
        file_id: Uuid,
        guest_id: Uuid,
    ) -> AppResult<Option<PermissionLevel>> {
        sqlx::query_scalar::<_, PermissionLevel>(
            "SELECT level FROM file_acl_entries \
             WHERE file_id = $1 AND principal_type = 'guest' AND principal_id = $2",
        )
        .bind(file_id)
        .bind(guest_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find grant", e))
    }

    /// Map guest grants for a set of files in one query (listing path).
    pub async fn find_guest_grants(
        &self,
        file_ids: &[Uuid],
        guest_id: Uuid,
    ) -> AppResult<HashMap<Uuid, PermissionLevel>> {
        if file_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (Uuid, PermissionLevel)>(
            "SELECT file_id, level FROM file_acl_entries \
             WHERE file_id = ANY($1) AND principal_type = 'guest' AND principal_id = $2",
        )
        .bind(file_ids)
        .bind(guest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to map grants", e))?;

        Ok(rows.into_iter().collect())
    }

    /// Atomically replace a file's grant set.
    ///
    /// The whole desired state is rewritten in one transaction: the file's
    /// `is_restricted` flag and `acl_version` are updated only if the
    /// caller's `expected_acl_version` still matches, otherwise the write
    /// is rejected as a concurrent-edit conflict and no rows change.
    ///
    /// An empty `entries` list leaves the stored grant rows untouched:
    /// lifting restriction retains the grants (they are simply not
    /// consulted), and re-enabling restriction without resending a list
    /// restores the retained one. Returns the new `acl_version`.
    pub async fn replace_entries(
        &self,
        file_id: Uuid,
        expected_acl_version: i32,
        is_restricted: bool,
        entries: &[CreateAclEntry],
    ) -> AppResult<i32> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin tx", e))?;

        let new_version: Option<i32> = sqlx::query_scalar(
            "UPDATE files SET is_restricted = $3, acl_version = acl_version + 1, \
             updated_at = NOW() WHERE id = $1 AND acl_version = $2 RETURNING acl_version",
        )
        .bind(file_id)
        .bind(expected_acl_version)
        .bind(is_restricted)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to bump ACL version", e))?;

        let Some(new_version) = new_version else {
            tx.rollback()
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rollback", e))?;
            return Err(AppError::conflict(
                "Permissions were changed by someone else. Reload and try again.",
            ));
        };

        if !entries.is_empty() {
            sqlx::query("DELETE FROM file_acl_entries WHERE file_id = $1")
                .bind(file_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to clear ACL entries", e)
                })?;
        }

        for entry in entries {
            sqlx::query(
                "INSERT INTO file_acl_entries (file_id, principal_type, principal_id, level) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (file_id, principal_type, principal_id) DO UPDATE SET level = $4",
            )
            .bind(file_id)
            .bind(entry.principal_type)
            .bind(entry.principal_id)
            .bind(entry.level)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert ACL entry", e)
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit tx", e))?;

        Ok(new_version)
    }

    /// Check whether a restricted file has any entry for the given
    /// principal regardless of type (used by roster-aware checks).
    pub async fn has_entry(
        &self,
        file_id: Uuid,
        principal_type: PrincipalType,
        principal_id: Uuid,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM file_acl_entries \
             WHERE file_id = $1 AND principal_type = $2 AND principal_id = $3)",
        )
        .bind(file_id)
        .bind(principal_type)
        .bind(principal_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check entry", e))
    }
}
