//! Folder-scoped content listing with server-side visibility filtering.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_database::repositories::file::FileRepository;
use dataroom_database::repositories::folder::FolderRepository;
use dataroom_database::repositories::permission::AclRepository;
use dataroom_entity::file::GuestFileView;
use dataroom_entity::folder::Folder;

use crate::context::GuestContext;
use crate::roster::{ProfileRef, RosterService};

/// One step in the root-to-current breadcrumb chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
}

/// The content gateway's response for one folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentListing {
    /// Child folders of the current folder.
    pub folders: Vec<Folder>,
    /// Visible files in the current folder, projected for this guest.
    pub files: Vec<GuestFileView>,
    /// Ancestor chain from root to the current folder.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// The folder being listed (None = room root).
    pub current_folder_id: Option<Uuid>,
    /// Every folder in the room, for pickers.
    pub all_folders: Vec<Folder>,
    /// Participant lookup map keyed by member/guest ID.
    pub profiles: HashMap<Uuid, ProfileRef>,
    /// Echo of the caller-supplied request sequence number, so clients
    /// apply only the newest response when navigations race.
    pub seq: Option<u64>,
}

/// Authorizes and lists one folder of a room for one guest.
///
/// There is deliberately no caching here: permissions can change between
/// navigations, so every call re-resolves visibility from the database.
#[derive(Debug, Clone)]
pub struct ContentService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// ACL repository.
    acl_repo: Arc<AclRepository>,
    /// Roster service (profile map).
    roster: Arc<RosterService>,
}

impl ContentService {
    /// Creates a new content service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        acl_repo: Arc<AclRepository>,
        roster: Arc<RosterService>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            acl_repo,
            roster,
        }
    }

    /// Lists the given folder (None = root) for the requesting guest.
    ///
    /// Restricted files without a grant for this guest are absent from the
    /// result entirely — the client has no independent enforcement.
    pub async fn list(
        &self,
        ctx: &GuestContext,
        folder_id: Option<Uuid>,
        seq: Option<u64>,
    ) -> Result<ContentListing, AppError> {
        let breadcrumbs = match folder_id {
            Some(id) => self.resolve_breadcrumbs(ctx, id).await?,
            None => Vec::new(),
        };

        let folders = self.folder_repo.find_children(ctx.room_id, folder_id).await?;
        let candidates = self.file_repo.find_in_folder(ctx.room_id, folder_id).await?;

        // Grants are only consulted for restricted files.
        let restricted_ids: Vec<Uuid> = candidates
            .iter()
            .filter(|f| f.is_restricted)
            .map(|f| f.id)
            .collect();
        let grants = self
            .acl_repo
            .find_guest_grants(&restricted_ids, ctx.guest_id)
            .await?;

        let files = candidates
            .iter()
            .filter(|f| f.is_visible_to_guest(ctx.guest_id, grants.get(&f.id).copied()))
            .map(|f| f.project_for_guest(ctx.guest_id, grants.get(&f.id).copied()))
            .collect();

        let all_folders = self.folder_repo.find_by_room(ctx.room_id).await?;
        let profiles = self.roster.profile_map(ctx.room_id).await?;

        Ok(ContentListing {
            folders,
            files,
            breadcrumbs,
            current_folder_id: folder_id,
            all_folders,
            profiles,
            seq,
        })
    }

    /// Resolves the root-to-folder ancestor chain, verifying room scope.
    async fn resolve_breadcrumbs(
        &self,
        ctx: &GuestContext,
        folder_id: Uuid,
    ) -> Result<Vec<Breadcrumb>, AppError> {
        let chain = self.folder_repo.find_ancestry(folder_id).await?;

        chain
            .last()
            .filter(|f| f.id == folder_id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        if chain.iter().any(|f| f.room_id != ctx.room_id) {
            return Err(AppError::not_found("Folder not found"));
        }

        Ok(chain
            .into_iter()
            .map(|f| Breadcrumb {
                id: f.id,
                name: f.name,
            })
            .collect())
    }
}
