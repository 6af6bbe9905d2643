//! Per-file access resolution for guests.

use std::sync::Arc;

use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_database::repositories::file::FileRepository;
use dataroom_database::repositories::permission::AclRepository;
use dataroom_entity::file::{File, FileStatus};
use dataroom_entity::permission::PermissionLevel;

use crate::context::GuestContext;

/// Loads files and answers per-guest access questions.
///
/// The rules, applied server-side on every call:
/// - an unrestricted file grants at least `view` to every participant;
/// - a restricted file is reachable only by its uploader and by guests
///   holding an explicit grant;
/// - delete and ACL management require being the uploader, full stop.
#[derive(Debug, Clone)]
pub struct FileAccessResolver {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// ACL repository.
    acl_repo: Arc<AclRepository>,
}

impl FileAccessResolver {
    /// Creates a new resolver.
    pub fn new(file_repo: Arc<FileRepository>, acl_repo: Arc<AclRepository>) -> Self {
        Self {
            file_repo,
            acl_repo,
        }
    }

    /// Loads an active file scoped to the guest's room.
    ///
    /// A file in another room or in the recycle bin reads as not-found, so
    /// probing cannot distinguish foreign files from absent ones.
    pub async fn load_room_file(&self, ctx: &GuestContext, file_id: Uuid) -> Result<File, AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .filter(|f| f.room_id == ctx.room_id && matches!(f.status, FileStatus::Active))
            .ok_or_else(|| AppError::not_found("File not found"))?;
        Ok(file)
    }

    /// The guest's explicit grant on a file, if any.
    pub async fn grant_for(
        &self,
        file: &File,
        guest_id: Uuid,
    ) -> Result<Option<PermissionLevel>, AppError> {
        self.acl_repo.find_guest_grant(file.id, guest_id).await
    }

    /// Loads a file and requires view access for the guest.
    pub async fn require_view(&self, ctx: &GuestContext, file_id: Uuid) -> Result<File, AppError> {
        let file = self.load_room_file(ctx, file_id).await?;
        let grant = self.grant_for(&file, ctx.guest_id).await?;
        if !file.is_visible_to_guest(ctx.guest_id, grant) {
            // Same shape as an absent file: restricted content must not
            // leak its existence through error codes.
            return Err(AppError::not_found("File not found"));
        }
        Ok(file)
    }

    /// Loads a file and requires edit capability for the guest.
    pub async fn require_edit(&self, ctx: &GuestContext, file_id: Uuid) -> Result<File, AppError> {
        let file = self.require_view(ctx, file_id).await?;
        let grant = self.grant_for(&file, ctx.guest_id).await?;
        let can_edit = file.is_uploaded_by(ctx.guest_id) || grant == Some(PermissionLevel::Edit);
        if !can_edit {
            return Err(AppError::forbidden(
                "You only have view access to this file",
            ));
        }
        Ok(file)
    }

    /// Loads a file and requires the guest to be its uploader.
    ///
    /// Distinguishable from not-found: the file is visible, the action is
    /// refused.
    pub async fn require_uploader(
        &self,
        ctx: &GuestContext,
        file_id: Uuid,
    ) -> Result<File, AppError> {
        let file = self.require_view(ctx, file_id).await?;
        if !file.is_uploaded_by(ctx.guest_id) {
            return Err(AppError::forbidden(
                "Only the uploader of a file can do this",
            ));
        }
        Ok(file)
    }
}
