//! Guest folder creation and deletion.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_database::repositories::folder::FolderRepository;
use dataroom_entity::folder::{CreateFolder, Folder};
use dataroom_realtime::{RealtimeHub, RoomEvent};

use crate::context::GuestContext;

/// Guest-scoped folder operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Realtime hub.
    realtime: Arc<RealtimeHub>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>, realtime: Arc<RealtimeHub>) -> Self {
        Self {
            folder_repo,
            realtime,
        }
    }

    /// Creates a guest-owned folder in the room.
    pub async fn create(
        &self,
        ctx: &GuestContext,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Folder, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        if let Some(parent_id) = parent_id {
            self.folder_repo
                .find_by_id(parent_id)
                .await?
                .filter(|f| f.room_id == ctx.room_id)
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
        }

        if self
            .folder_repo
            .find_by_parent_and_name(ctx.room_id, parent_id, name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "A folder named '{name}' already exists here"
            )));
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                room_id: ctx.room_id,
                parent_id,
                name: name.to_string(),
                created_by_guest: Some(ctx.guest_id),
            })
            .await?;

        info!(guest_id = %ctx.guest_id, folder_id = %folder.id, "Guest created folder");

        self.realtime.publish(
            ctx.room_id,
            RoomEvent::ContentChanged {
                folder_id: parent_id,
            },
        );

        Ok(folder)
    }

    /// Deletes a guest-created, empty folder.
    pub async fn delete(&self, ctx: &GuestContext, folder_id: Uuid) -> Result<(), AppError> {
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .filter(|f| f.room_id == ctx.room_id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if folder.created_by_guest != Some(ctx.guest_id) {
            return Err(AppError::forbidden(
                "Only the creator of a folder can delete it",
            ));
        }

        if self.folder_repo.count_contents(folder.id).await? > 0 {
            return Err(AppError::conflict(
                "Folder is not empty. Move or delete its contents first.",
            ));
        }

        self.folder_repo.delete(folder.id).await?;

        info!(guest_id = %ctx.guest_id, folder_id = %folder.id, "Guest deleted folder");

        self.realtime.publish(
            ctx.room_id,
            RoomEvent::ContentChanged {
                folder_id: folder.parent_id,
            },
        );

        Ok(())
    }
}
