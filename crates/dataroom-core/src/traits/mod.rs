//! Cross-crate trait definitions.

pub mod storage;
