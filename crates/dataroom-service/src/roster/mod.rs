//! Room roster service.

pub mod service;

pub use service::{GuestProfile, ProfileRef, RosterService, TeamRoster};
