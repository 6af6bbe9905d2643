//! Guest invite domain entities.

pub mod model;

pub use model::{GuestInvite, GuestStatus};
