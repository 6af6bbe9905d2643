//! Guest file upload handling.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_database::repositories::file::FileRepository;
use dataroom_database::repositories::folder::FolderRepository;
use dataroom_entity::activity::ActivityAction;
use dataroom_entity::file::{CreateFile, GuestFileView};
use dataroom_realtime::{RealtimeHub, RoomEvent};
use dataroom_storage::StorageManager;

use crate::activity::ActivityService;
use crate::context::GuestContext;
use crate::permission::FileAccessResolver;

/// Handles single-file guest uploads.
///
/// Multi-file batches are client-side loops over this operation; each
/// request succeeds or fails on its own, and the client re-fetches the
/// listing afterwards instead of appending speculatively.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository (placement checks).
    folder_repo: Arc<FolderRepository>,
    /// Access resolver (same-name supersede checks).
    resolver: Arc<FileAccessResolver>,
    /// Storage manager.
    storage: Arc<StorageManager>,
    /// Activity recorder.
    activity: Arc<ActivityService>,
    /// Realtime hub.
    realtime: Arc<RealtimeHub>,
    /// Maximum accepted upload size in bytes.
    max_upload_size_bytes: u64,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        resolver: Arc<FileAccessResolver>,
        storage: Arc<StorageManager>,
        activity: Arc<ActivityService>,
        realtime: Arc<RealtimeHub>,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            resolver,
            storage,
            activity,
            realtime,
            max_upload_size_bytes,
        }
    }

    /// Stores one uploaded file and returns its projection for the uploader.
    ///
    /// Re-uploading a name that already exists in the folder supersedes
    /// that file with a new version — provided the guest may edit it.
    pub async fn upload(
        &self,
        ctx: &GuestContext,
        folder_id: Option<Uuid>,
        name: &str,
        mime_type: Option<String>,
        data: Bytes,
    ) -> Result<GuestFileView, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if data.is_empty() {
            return Err(AppError::validation(format!("'{name}' is empty")));
        }
        if data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "'{name}' exceeds the maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }

        if let Some(folder_id) = folder_id {
            self.folder_repo
                .find_by_id(folder_id)
                .await?
                .filter(|f| f.room_id == ctx.room_id)
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
        }

        let existing = self
            .file_repo
            .find_by_folder_and_name(ctx.room_id, folder_id, name)
            .await?;

        let view = match existing {
            Some(current) => self.supersede(ctx, current.id, mime_type, data).await?,
            None => self.create(ctx, folder_id, name, mime_type, data).await?,
        };

        self.realtime
            .publish(ctx.room_id, RoomEvent::ContentChanged { folder_id });

        Ok(view)
    }

    /// First upload of a name: create a fresh file record.
    async fn create(
        &self,
        ctx: &GuestContext,
        folder_id: Option<Uuid>,
        name: &str,
        mime_type: Option<String>,
        data: Bytes,
    ) -> Result<GuestFileView, AppError> {
        let object_id = Uuid::new_v4();
        let storage_path = self.storage.object_path(ctx.room_id, object_id, 1);
        let size_bytes = data.len() as i64;

        self.storage.provider().write(&storage_path, data).await?;

        let created = self
            .file_repo
            .create(&CreateFile {
                room_id: ctx.room_id,
                folder_id,
                name: name.to_string(),
                storage_path,
                size_bytes,
                mime_type,
                uploaded_by_guest: Some(ctx.guest_id),
                uploaded_by_name: ctx.display_name.clone(),
            })
            .await?;

        info!(
            guest_id = %ctx.guest_id,
            file_id = %created.id,
            size_bytes,
            "Guest uploaded file"
        );

        self.activity
            .record(
                ctx,
                ActivityAction::FileUpload,
                Some(serde_json::json!({ "file": created.name })),
            )
            .await;

        Ok(created.project_for_guest(ctx.guest_id, None))
    }

    /// Same-name upload: archive the current content as a version.
    async fn supersede(
        &self,
        ctx: &GuestContext,
        file_id: Uuid,
        mime_type: Option<String>,
        data: Bytes,
    ) -> Result<GuestFileView, AppError> {
        let current = self.resolver.require_edit(ctx, file_id).await.map_err(|e| {
            if e.kind == dataroom_core::error::ErrorKind::Forbidden {
                AppError::conflict(
                    "A file with this name already exists and you cannot replace it",
                )
            } else {
                e
            }
        })?;

        let object_id = Uuid::new_v4();
        let storage_path = self
            .storage
            .object_path(ctx.room_id, object_id, current.version + 1);
        let size_bytes = data.len() as i64;

        self.storage.provider().write(&storage_path, data).await?;

        let updated = self
            .file_repo
            .supersede(
                &current,
                &storage_path,
                size_bytes,
                mime_type.as_deref(),
                Some(ctx.guest_id),
                &ctx.display_name,
            )
            .await?;

        info!(
            guest_id = %ctx.guest_id,
            file_id = %updated.id,
            version = updated.version,
            "Guest uploaded new file version"
        );

        self.activity
            .record(
                ctx,
                ActivityAction::VersionCreated,
                Some(serde_json::json!({ "file": updated.name, "version": updated.version })),
            )
            .await;

        let grant = self.resolver.grant_for(&updated, ctx.guest_id).await?;
        Ok(updated.project_for_guest(ctx.guest_id, grant))
    }
}
