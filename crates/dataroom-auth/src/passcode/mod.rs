//! One-time passcode generation and verification.

pub mod generator;
pub mod hasher;

pub use generator::generate_passcode;
pub use hasher::PasscodeHasher;
