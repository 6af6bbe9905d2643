//! # dataroom-auth
//!
//! Guest credential primitives: one-time passcode generation and Argon2id
//! hashing, the guest session token (JWT), and time-limited signed
//! download tokens.

pub mod passcode;
pub mod token;

pub use passcode::PasscodeHasher;
pub use token::{DownloadTokenSigner, GuestSessionClaims, SessionTokenCodec};
