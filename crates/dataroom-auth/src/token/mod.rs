//! Signed token primitives for guest sessions and download URLs.

pub mod claims;
pub mod codec;
pub mod download;

pub use claims::GuestSessionClaims;
pub use codec::SessionTokenCodec;
pub use download::{DownloadClaims, DownloadMode, DownloadTokenSigner};
