//! ACL read and replace operations, uploader-only.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_database::repositories::guest::GuestRepository;
use dataroom_database::repositories::member::MemberRepository;
use dataroom_database::repositories::permission::AclRepository;
use dataroom_entity::permission::{CreateAclEntry, PermissionLevel, PrincipalType};
use dataroom_realtime::{RealtimeHub, RoomEvent};

use crate::context::GuestContext;
use crate::roster::GuestProfile;

use super::resolver::FileAccessResolver;

/// One grant as returned to the ACL dialog, enriched with the principal's
/// display name and email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionEntry {
    /// Grant entry ID.
    pub id: Uuid,
    /// Principal kind.
    #[serde(rename = "type")]
    pub principal_type: PrincipalType,
    /// The member or guest being granted.
    pub reference_id: Uuid,
    /// Capability granted.
    pub permission_level: PermissionLevel,
    /// Principal display name.
    pub name: String,
    /// Principal email, when known.
    pub email: Option<String>,
}

/// The full permission state of one file, as seen by its uploader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePermissions {
    /// Whether the file carries an explicit allow-list.
    pub is_restricted: bool,
    /// Current grant entries.
    pub entries: Vec<PermissionEntry>,
    /// Team members available to grant.
    pub available_team: Vec<GuestProfile>,
    /// Guests available to grant (the uploader themselves excluded).
    pub available_guests: Vec<GuestProfile>,
    /// Optimistic-concurrency token; must be sent back on write.
    pub acl_version: i32,
}

/// Desired permission state sent by the ACL dialog.
///
/// The client always resends the complete grant set; the server replaces
/// rather than merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPermissionsRequest {
    /// Whether the file should be restricted.
    pub is_restricted: bool,
    /// The complete desired grant set.
    pub entries: Vec<CreateAclEntry>,
    /// The `acl_version` the client read; stale values are rejected.
    pub acl_version: i32,
}

/// Uploader-only ACL management for one file at a time.
#[derive(Debug, Clone)]
pub struct PermissionService {
    /// Access resolver (uploader checks).
    resolver: Arc<FileAccessResolver>,
    /// ACL repository.
    acl_repo: Arc<AclRepository>,
    /// Member repository (principal enrichment).
    member_repo: Arc<MemberRepository>,
    /// Guest repository (principal enrichment).
    guest_repo: Arc<GuestRepository>,
    /// Realtime hub for change broadcasts.
    realtime: Arc<RealtimeHub>,
}

impl PermissionService {
    /// Creates a new permission service.
    pub fn new(
        resolver: Arc<FileAccessResolver>,
        acl_repo: Arc<AclRepository>,
        member_repo: Arc<MemberRepository>,
        guest_repo: Arc<GuestRepository>,
        realtime: Arc<RealtimeHub>,
    ) -> Self {
        Self {
            resolver,
            acl_repo,
            member_repo,
            guest_repo,
            realtime,
        }
    }

    /// Reads a file's permission state. Only the uploader may call this.
    pub async fn get_permissions(
        &self,
        ctx: &GuestContext,
        file_id: Uuid,
    ) -> Result<FilePermissions, AppError> {
        let file = self.resolver.require_uploader(ctx, file_id).await?;

        let (team, guests) = self.room_principals(ctx).await?;
        let entries = self.acl_repo.find_by_file(file.id).await?;

        let entries = entries
            .into_iter()
            .map(|e| {
                let (name, email) = match e.principal_type {
                    PrincipalType::Team => team
                        .get(&e.principal_id)
                        .map(|p| (p.name.clone(), Some(p.email.clone())))
                        .unwrap_or_else(|| ("Former member".to_string(), None)),
                    PrincipalType::Guest => guests
                        .get(&e.principal_id)
                        .map(|p| (p.name.clone(), Some(p.email.clone())))
                        .unwrap_or_else(|| ("Former guest".to_string(), None)),
                };
                PermissionEntry {
                    id: e.id,
                    principal_type: e.principal_type,
                    reference_id: e.principal_id,
                    permission_level: e.level,
                    name,
                    email,
                }
            })
            .collect();

        Ok(FilePermissions {
            is_restricted: file.is_restricted,
            entries,
            available_team: team.into_values().collect(),
            available_guests: guests
                .into_values()
                .filter(|g| g.id != ctx.guest_id)
                .collect(),
            acl_version: file.acl_version,
        })
    }

    /// Replaces a file's permission state atomically.
    ///
    /// Idempotent for identical payloads applied sequentially: re-sending
    /// the grant set (with the freshly returned version) converges on the
    /// same state without accumulating duplicates. Concurrent writers race
    /// on `acl_version` and the loser gets a conflict instead of silently
    /// overwriting. An empty grant list retains whatever is stored, so
    /// unrestricting and later re-restricting a file brings the prior
    /// grants back.
    pub async fn set_permissions(
        &self,
        ctx: &GuestContext,
        file_id: Uuid,
        req: SetPermissionsRequest,
    ) -> Result<i32, AppError> {
        let file = self.resolver.require_uploader(ctx, file_id).await?;

        self.validate_principals(ctx, &req.entries).await?;

        let new_version = self
            .acl_repo
            .replace_entries(file.id, req.acl_version, req.is_restricted, &req.entries)
            .await?;

        info!(
            guest_id = %ctx.guest_id,
            file_id = %file.id,
            is_restricted = req.is_restricted,
            entries = req.entries.len(),
            "File permissions replaced"
        );

        self.realtime
            .publish(ctx.room_id, RoomEvent::AclChanged { file_id: file.id });
        self.realtime.publish(
            ctx.room_id,
            RoomEvent::ContentChanged {
                folder_id: file.folder_id,
            },
        );

        Ok(new_version)
    }

    /// Rejects grants to principals outside the room.
    async fn validate_principals(
        &self,
        ctx: &GuestContext,
        entries: &[CreateAclEntry],
    ) -> Result<(), AppError> {
        let (team, guests) = self.room_principals(ctx).await?;

        for entry in entries {
            let known = match entry.principal_type {
                PrincipalType::Team => team.contains_key(&entry.principal_id),
                PrincipalType::Guest => guests.contains_key(&entry.principal_id),
            };
            if !known {
                return Err(AppError::validation(format!(
                    "Unknown {} principal: {}",
                    entry.principal_type, entry.principal_id
                )));
            }
        }

        Ok(())
    }

    /// Loads the room's principals keyed by ID.
    async fn room_principals(
        &self,
        ctx: &GuestContext,
    ) -> Result<(HashMap<Uuid, GuestProfile>, HashMap<Uuid, GuestProfile>), AppError> {
        let team = self
            .member_repo
            .find_by_room(ctx.room_id)
            .await?
            .into_iter()
            .map(|m| {
                (
                    m.id,
                    GuestProfile {
                        id: m.id,
                        name: m.user_name,
                        email: m.email,
                    },
                )
            })
            .collect();

        let guests = self
            .guest_repo
            .find_by_room(ctx.room_id)
            .await?
            .into_iter()
            .map(|g| {
                (
                    g.id,
                    GuestProfile {
                        id: g.id,
                        name: g.display_name,
                        email: g.email,
                    },
                )
            })
            .collect();

        Ok((team, guests))
    }
}
