//! Flat append-only room chat.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use dataroom_core::error::AppError;
use dataroom_database::repositories::message::MessageRepository;
use dataroom_entity::activity::ActivityAction;
use dataroom_entity::message::{CreateMessage, Message};
use dataroom_realtime::{RealtimeHub, RoomEvent};

use crate::activity::ActivityService;
use crate::context::GuestContext;

/// Chat over one shared channel per room. No threading, no edit, no
/// delete; unread counts are a client-side derivation.
#[derive(Debug, Clone)]
pub struct ChatService {
    /// Message repository.
    message_repo: Arc<MessageRepository>,
    /// Activity recorder.
    activity: Arc<ActivityService>,
    /// Realtime hub.
    realtime: Arc<RealtimeHub>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(
        message_repo: Arc<MessageRepository>,
        activity: Arc<ActivityService>,
        realtime: Arc<RealtimeHub>,
    ) -> Self {
        Self {
            message_repo,
            activity,
            realtime,
        }
    }

    /// Lists the room's messages in chronological order, optionally only
    /// those newer than `since`.
    pub async fn list(
        &self,
        ctx: &GuestContext,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Message>, AppError> {
        self.message_repo.find_by_room(ctx.room_id, since).await
    }

    /// Appends one message from the requesting guest.
    pub async fn send(&self, ctx: &GuestContext, body: &str) -> Result<Message, AppError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::validation("Message cannot be empty"));
        }

        let message = self
            .message_repo
            .create(&CreateMessage {
                room_id: ctx.room_id,
                sender_guest_id: Some(ctx.guest_id),
                sender_name: ctx.display_name.clone(),
                sender_email: ctx.email.clone(),
                body: body.to_string(),
                is_guest: true,
            })
            .await?;

        info!(guest_id = %ctx.guest_id, message_id = %message.id, "Guest sent message");

        self.activity
            .record(ctx, ActivityAction::MessageSent, None)
            .await;

        self.realtime.publish(
            ctx.room_id,
            RoomEvent::MessageCreated {
                message: message.clone(),
            },
        );

        Ok(message)
    }
}
