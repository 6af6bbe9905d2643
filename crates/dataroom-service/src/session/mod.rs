//! Guest session verification and the NDA resign flow.

pub mod service;

pub use service::{NdaDetails, SessionService, VerifiedSession};
