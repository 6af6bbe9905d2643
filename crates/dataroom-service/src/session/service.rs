//! The guest session verifier.
//!
//! The only component that can turn credentials into a browsing session.
//! Verification hashes the passcode once and issues a short-lived signed
//! session token; authorization for every later call still goes back to
//! the database via [`SessionService::authorize`], so revocation and NDA
//! changes take effect mid-session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use dataroom_auth::passcode::PasscodeHasher;
use dataroom_auth::token::claims::GuestSessionClaims;
use dataroom_auth::token::codec::SessionTokenCodec;
use dataroom_core::error::AppError;
use dataroom_database::repositories::guest::GuestRepository;
use dataroom_database::repositories::room::RoomRepository;
use dataroom_entity::activity::ActivityAction;
use dataroom_entity::guest::GuestInvite;
use dataroom_entity::room::{DataRoom, RoomSummary};

use crate::activity::ActivityService;
use crate::content::{ContentListing, ContentService};
use crate::context::GuestContext;

/// Message returned alongside the `NDA_UPDATED` error code.
const NDA_UPDATED_MESSAGE: &str =
    "The confidentiality agreement for this data room has changed since you last signed it. \
     Please review and accept the updated terms to continue.";

/// Everything a guest needs to start browsing after verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedSession {
    /// Immutable room snapshot.
    pub room: RoomSummary,
    /// Guest display name.
    pub guest_name: String,
    /// Signed session token for subsequent calls.
    pub session_token: String,
    /// When the session token expires.
    pub expires_at: DateTime<Utc>,
    /// The initial content listing (root, unless a folder was requested).
    pub content: ContentListing,
}

/// The resign flow's secondary lookup: current NDA text plus enough room
/// context to render the signing screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NdaDetails {
    /// Current NDA text.
    pub nda_content: String,
    /// Current NDA revision.
    pub nda_version: i32,
    /// Guest display name.
    pub guest_name: String,
    /// Room snapshot for the header.
    pub room: RoomSummary,
}

/// Verifies guest credentials, runs the NDA resign flow, and authorizes
/// session tokens on every subsequent call.
#[derive(Debug, Clone)]
pub struct SessionService {
    /// Guest repository.
    guest_repo: Arc<GuestRepository>,
    /// Room repository.
    room_repo: Arc<RoomRepository>,
    /// Passcode hasher.
    hasher: Arc<PasscodeHasher>,
    /// Session token codec.
    token_codec: Arc<SessionTokenCodec>,
    /// Content gateway for the initial listing.
    content: Arc<ContentService>,
    /// Activity recorder.
    activity: Arc<ActivityService>,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(
        guest_repo: Arc<GuestRepository>,
        room_repo: Arc<RoomRepository>,
        hasher: Arc<PasscodeHasher>,
        token_codec: Arc<SessionTokenCodec>,
        content: Arc<ContentService>,
        activity: Arc<ActivityService>,
    ) -> Self {
        Self {
            guest_repo,
            room_repo,
            hasher,
            token_codec,
            content,
            activity,
        }
    }

    /// Verifies an (email, passcode) pair and opens a browsing session.
    ///
    /// On an NDA-version mismatch this returns the distinguished
    /// `NDA_UPDATED` error instead of a session; the client detours
    /// through [`Self::nda_details`] and [`Self::sign_nda`], then retries.
    pub async fn verify(
        &self,
        email: &str,
        passcode: &str,
        folder_id: Option<Uuid>,
    ) -> Result<VerifiedSession, AppError> {
        let (invite, room) = self.check_credentials(email, passcode).await?;

        if !invite.has_signed(room.nda_version) {
            return Err(AppError::nda_updated(NDA_UPDATED_MESSAGE));
        }

        self.guest_repo.mark_active(invite.id).await?;

        let (token, claims) =
            self.token_codec
                .issue(invite.id, room.id, &invite.email, room.nda_version)?;

        let ctx = GuestContext {
            guest_id: invite.id,
            room_id: room.id,
            email: invite.email.clone(),
            display_name: invite.display_name.clone(),
        };

        let content = self.content.list(&ctx, folder_id, None).await?;

        info!(guest_id = %invite.id, room_id = %room.id, "Guest session opened");

        Ok(VerifiedSession {
            room: room.summary(),
            guest_name: invite.display_name,
            session_token: token,
            expires_at: claims.expires_at(),
            content,
        })
    }

    /// The resign flow's credential-keyed NDA lookup.
    ///
    /// Works while the guest is locked out of a session: the passcode must
    /// verify, but an outdated signature does not block this call.
    pub async fn nda_details(&self, email: &str, passcode: &str) -> Result<NdaDetails, AppError> {
        let (invite, room) = self.check_credentials(email, passcode).await?;

        Ok(NdaDetails {
            nda_content: room.nda_content.clone(),
            nda_version: room.nda_version,
            guest_name: invite.display_name,
            room: room.summary(),
        })
    }

    /// Records the guest's acceptance of the room's current NDA revision.
    pub async fn sign_nda(
        &self,
        email: &str,
        passcode: &str,
        signer_name: &str,
    ) -> Result<(), AppError> {
        let signer_name = signer_name.trim();
        if signer_name.is_empty() {
            return Err(AppError::validation("Please type your name to sign"));
        }

        let (invite, room) = self.check_credentials(email, passcode).await?;

        self.guest_repo
            .record_nda_signature(invite.id, room.nda_version, signer_name, Utc::now())
            .await?;

        info!(
            guest_id = %invite.id,
            room_id = %room.id,
            nda_version = room.nda_version,
            "Guest signed NDA"
        );

        let ctx = GuestContext {
            guest_id: invite.id,
            room_id: room.id,
            email: invite.email,
            display_name: invite.display_name,
        };
        self.activity
            .record(
                &ctx,
                ActivityAction::NdaSigned,
                Some(serde_json::json!({ "nda_version": room.nda_version })),
            )
            .await;

        Ok(())
    }

    /// Re-validates a session token's guest against the database.
    ///
    /// Called on every authenticated operation. Revoked invites and
    /// archived rooms read as unauthorized; an NDA that changed after the
    /// token was issued surfaces as `NDA_UPDATED`, sending the client back
    /// through the resign flow mid-session.
    pub async fn authorize(&self, claims: &GuestSessionClaims) -> Result<GuestContext, AppError> {
        let invite = self
            .guest_repo
            .find_by_id(claims.guest_id())
            .await?
            .filter(|i| i.is_usable() && i.room_id == claims.room_id())
            .ok_or_else(|| AppError::unauthorized("This invitation is no longer valid"))?;

        let room = self.load_active_room(invite.room_id).await?;

        if !invite.has_signed(room.nda_version) {
            return Err(AppError::nda_updated(NDA_UPDATED_MESSAGE));
        }

        Ok(GuestContext {
            guest_id: invite.id,
            room_id: room.id,
            email: invite.email,
            display_name: invite.display_name,
        })
    }

    /// Resolves credentials to a usable (invite, active room) pair.
    ///
    /// One email can hold invites to several rooms; the passcode picks the
    /// matching one. All failure modes collapse into the same
    /// unauthorized message so probing reveals nothing.
    async fn check_credentials(
        &self,
        email: &str,
        passcode: &str,
    ) -> Result<(GuestInvite, DataRoom), AppError> {
        let email = email.trim();
        let passcode = passcode.trim();
        if email.is_empty() || passcode.is_empty() {
            return Err(AppError::validation("Email and passcode are required"));
        }

        let candidates = self.guest_repo.find_usable_by_email(email).await?;

        for invite in candidates {
            if self.hasher.verify(passcode, &invite.passcode_hash)? {
                let room = self.load_active_room(invite.room_id).await?;
                return Ok((invite, room));
            }
        }

        Err(AppError::unauthorized("Invalid email or passcode"))
    }

    /// Loads a room, refusing archived or missing ones.
    async fn load_active_room(&self, room_id: Uuid) -> Result<DataRoom, AppError> {
        self.room_repo
            .find_by_id(room_id)
            .await?
            .filter(|r| r.is_active())
            .ok_or_else(|| AppError::unauthorized("This data room is no longer available"))
    }
}
