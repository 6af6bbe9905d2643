//! Guest authentication configuration.

use serde::{Deserialize, Serialize};

/// Guest credential and session token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Guest session token TTL in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// Signed download URL TTL in minutes.
    #[serde(default = "default_download_ttl")]
    pub download_ttl_minutes: u64,
    /// Length of generated one-time passcodes.
    #[serde(default = "default_passcode_length")]
    pub passcode_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_minutes: default_session_ttl(),
            download_ttl_minutes: default_download_ttl(),
            passcode_length: default_passcode_length(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    60
}

fn default_download_ttl() -> u64 {
    15
}

fn default_passcode_length() -> usize {
    8
}
