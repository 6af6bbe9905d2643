//! Activity feed listing and recording.

use std::sync::Arc;

use tracing::warn;

use dataroom_core::error::AppError;
use dataroom_database::repositories::activity::ActivityRepository;
use dataroom_entity::activity::{ActivityAction, ActivityEntry, CreateActivityEntry};

use crate::context::GuestContext;

/// Reads the room activity feed and appends guest-attributed entries.
#[derive(Debug, Clone)]
pub struct ActivityService {
    /// Activity repository.
    activity_repo: Arc<ActivityRepository>,
}

impl ActivityService {
    /// Creates a new activity service.
    pub fn new(activity_repo: Arc<ActivityRepository>) -> Self {
        Self { activity_repo }
    }

    /// Lists the room's activity, newest first, no pagination.
    pub async fn list(&self, ctx: &GuestContext) -> Result<Vec<ActivityEntry>, AppError> {
        self.activity_repo.find_by_room(ctx.room_id).await
    }

    /// Appends one entry attributed to the requesting guest.
    ///
    /// Recording is best-effort: a failed audit write is logged but never
    /// fails the mutation it accompanies.
    pub async fn record(
        &self,
        ctx: &GuestContext,
        action: ActivityAction,
        details: Option<serde_json::Value>,
    ) {
        let entry = CreateActivityEntry {
            room_id: ctx.room_id,
            actor_name: ctx.display_name.clone(),
            actor_email: ctx.email.clone(),
            is_guest: true,
            action,
            details,
        };

        if let Err(e) = self.activity_repo.create(&entry).await {
            warn!(room_id = %ctx.room_id, error = %e, "Failed to record activity entry");
        }
    }
}
