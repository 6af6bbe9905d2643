//! File deletion and version history.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_database::repositories::file::FileRepository;
use dataroom_entity::activity::ActivityAction;
use dataroom_entity::file::FileVersion;
use dataroom_realtime::{RealtimeHub, RoomEvent};

use crate::activity::ActivityService;
use crate::context::GuestContext;
use crate::permission::FileAccessResolver;
use crate::roster::{ProfileRef, RosterService};

/// A file's version history plus the participant lookup map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionHistory {
    /// All versions, newest first. The head entry mirrors the file's
    /// current row; archived versions follow.
    pub versions: Vec<FileVersion>,
    /// Participant lookup map keyed by member/guest ID.
    pub profiles: HashMap<Uuid, ProfileRef>,
}

/// Deletion and version-history operations on room files.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Access resolver.
    resolver: Arc<FileAccessResolver>,
    /// Roster service (profile map).
    roster: Arc<RosterService>,
    /// Activity recorder.
    activity: Arc<ActivityService>,
    /// Realtime hub.
    realtime: Arc<RealtimeHub>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        resolver: Arc<FileAccessResolver>,
        roster: Arc<RosterService>,
        activity: Arc<ActivityService>,
        realtime: Arc<RealtimeHub>,
    ) -> Self {
        Self {
            file_repo,
            resolver,
            roster,
            activity,
            realtime,
        }
    }

    /// Moves a file to the recycle bin. Only the uploader may delete.
    ///
    /// Deletion is soft: the row and its stored bytes survive for
    /// team-side recovery, matching the platform's non-guest delete
    /// semantics.
    pub async fn delete(&self, ctx: &GuestContext, file_id: Uuid) -> Result<(), AppError> {
        let file = self.resolver.require_uploader(ctx, file_id).await?;

        self.file_repo.soft_delete(file.id).await?;

        info!(guest_id = %ctx.guest_id, file_id = %file.id, "Guest deleted file");

        self.activity
            .record(
                ctx,
                ActivityAction::FileDeleted,
                Some(serde_json::json!({ "file": file.name })),
            )
            .await;

        self.realtime.publish(
            ctx.room_id,
            RoomEvent::ContentChanged {
                folder_id: file.folder_id,
            },
        );

        Ok(())
    }

    /// Lists a file's version history, newest first, for any guest who can
    /// view the file.
    pub async fn versions(
        &self,
        ctx: &GuestContext,
        file_id: Uuid,
    ) -> Result<VersionHistory, AppError> {
        let file = self.resolver.require_view(ctx, file_id).await?;

        let mut versions = vec![FileVersion {
            id: file.id,
            file_id: file.id,
            version: file.version,
            name: file.name.clone(),
            storage_path: file.storage_path.clone(),
            size_bytes: file.size_bytes,
            mime_type: file.mime_type.clone(),
            uploaded_by_guest: file.uploaded_by_guest,
            uploaded_by_name: file.uploaded_by_name.clone(),
            created_at: file.updated_at,
        }];
        versions.extend(self.file_repo.find_versions(file.id).await?);

        let profiles = self.roster.profile_map(ctx.room_id).await?;

        Ok(VersionHistory { versions, profiles })
    }

    /// Version restore is a team-side operation.
    ///
    /// Returns the distinguished not-available response (never a
    /// permission error) so the client can tell "guests can't do this"
    /// from "this failed".
    pub async fn restore_version(
        &self,
        ctx: &GuestContext,
        file_id: Uuid,
        _version: i32,
    ) -> Result<(), AppError> {
        self.resolver.require_view(ctx, file_id).await?;
        Err(AppError::not_available(
            "Version restore is not available for guests",
        ))
    }

    /// Version deletion is a team-side operation; see [`Self::restore_version`].
    pub async fn delete_version(
        &self,
        ctx: &GuestContext,
        file_id: Uuid,
        _version: i32,
    ) -> Result<(), AppError> {
        self.resolver.require_view(ctx, file_id).await?;
        Err(AppError::not_available(
            "Version deletion is not available for guests",
        ))
    }
}
