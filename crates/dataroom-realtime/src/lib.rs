//! # dataroom-realtime
//!
//! Per-room broadcast hub backing the guest WebSocket feed. Services
//! publish [`event::RoomEvent`]s after mutations; connected guests receive
//! them as JSON frames and react by re-fetching content.

pub mod event;
pub mod hub;

pub use event::RoomEvent;
pub use hub::RealtimeHub;
