//! # dataroom-service
//!
//! The guest access broker proper: session verification and the NDA
//! resign flow, the content & permission gateway, per-file ACL
//! management, upload/download/delete/version handlers, folders, chat,
//! the activity feed, and the room roster.
//!
//! Every service receives a [`context::GuestContext`] that the session
//! layer only hands out after re-validating the guest's standing, so
//! handlers never trust a stale session object.

pub mod activity;
pub mod chat;
pub mod content;
pub mod context;
pub mod file;
pub mod folder;
pub mod permission;
pub mod roster;
pub mod session;
