//! Per-room broadcast channel registry.

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use dataroom_core::config::realtime::RealtimeConfig;

use crate::event::RoomEvent;

/// Registry of per-room broadcast channels.
///
/// Channels are created lazily on first subscribe or publish and removed
/// when the last receiver is gone. A slow receiver lags (dropping oldest
/// events) rather than blocking publishers; lagged clients recover by
/// re-fetching content.
#[derive(Debug)]
pub struct RealtimeHub {
    channels: DashMap<Uuid, broadcast::Sender<RoomEvent>>,
    buffer_size: usize,
}

impl RealtimeHub {
    /// Creates a new hub from configuration.
    pub fn new(config: &RealtimeConfig) -> Self {
        Self {
            channels: DashMap::new(),
            buffer_size: config.channel_buffer_size,
        }
    }

    /// Subscribe to a room's event feed.
    pub fn subscribe(&self, room_id: Uuid) -> broadcast::Receiver<RoomEvent> {
        self.channels
            .entry(room_id)
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .subscribe()
    }

    /// Publish an event to a room's feed.
    ///
    /// A room with no connected participants is a no-op.
    pub fn publish(&self, room_id: Uuid, event: RoomEvent) {
        if let Some(sender) = self.channels.get(&room_id) {
            let delivered = sender.send(event).unwrap_or(0);
            debug!(%room_id, delivered, "Published room event");
        }

        self.sweep(room_id);
    }

    /// Drop a room's channel once nobody is listening.
    fn sweep(&self, room_id: Uuid) {
        self.channels
            .remove_if(&room_id, |_, sender| sender.receiver_count() == 0);
    }

    /// Number of rooms with live channels (for health reporting).
    pub fn active_rooms(&self) -> usize {
        self.channels.len()
    }
}
