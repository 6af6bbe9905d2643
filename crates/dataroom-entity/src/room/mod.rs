//! Data room domain entities.

pub mod model;

pub use model::{DataRoom, RoomStatus, RoomSummary};
