//! Team and guest roster projections.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_database::repositories::guest::GuestRepository;
use dataroom_database::repositories::member::MemberRepository;
use dataroom_entity::member::Member;

use crate::context::GuestContext;

/// Read-only roster projections for the team display, ACL pickers, and
/// profile lookup maps.
#[derive(Debug, Clone)]
pub struct RosterService {
    /// Member repository.
    member_repo: Arc<MemberRepository>,
    /// Guest repository.
    guest_repo: Arc<GuestRepository>,
}

/// A guest as shown in rosters and ACL pickers. Never exposes credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestProfile {
    /// Guest invite ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// A participant name/email pair for rendering without N+1 lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRef {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Whether this participant is a guest.
    pub is_guest: bool,
}

/// The combined roster of a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRoster {
    /// Team members of the owning organization.
    pub members: Vec<Member>,
    /// Active guests (revoked invites excluded).
    pub guests: Vec<GuestProfile>,
}

impl RosterService {
    /// Creates a new roster service.
    pub fn new(member_repo: Arc<MemberRepository>, guest_repo: Arc<GuestRepository>) -> Self {
        Self {
            member_repo,
            guest_repo,
        }
    }

    /// Lists the room's team members and active guests.
    pub async fn list(&self, ctx: &GuestContext) -> Result<TeamRoster, AppError> {
        let members = self.member_repo.find_by_room(ctx.room_id).await?;
        let guests = self
            .guest_repo
            .find_by_room(ctx.room_id)
            .await?
            .into_iter()
            .map(|g| GuestProfile {
                id: g.id,
                name: g.display_name,
                email: g.email,
            })
            .collect();

        Ok(TeamRoster { members, guests })
    }

    /// Builds the participant lookup map keyed by member/guest ID.
    pub async fn profile_map(&self, room_id: Uuid) -> Result<HashMap<Uuid, ProfileRef>, AppError> {
        let mut profiles = HashMap::new();

        for member in self.member_repo.find_by_room(room_id).await? {
            profiles.insert(
                member.id,
                ProfileRef {
                    name: member.user_name,
                    email: member.email,
                    is_guest: false,
                },
            );
        }

        for guest in self.guest_repo.find_by_room(room_id).await? {
            profiles.insert(
                guest.id,
                ProfileRef {
                    name: guest.display_name,
                    email: guest.email,
                    is_guest: true,
                },
            );
        }

        Ok(profiles)
    }
}
