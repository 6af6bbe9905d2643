//! Time-limited signed download tokens.
//!
//! A download URL embeds one of these tokens; presenting it is the entire
//! authorization, so the token is minted only after the issuing handler
//! has checked the guest's access to the file.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dataroom_core::config::auth::AuthConfig;
use dataroom_core::error::AppError;

/// How the fetched bytes should be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    /// Inline disposition — the browser renders the file (print-to-PDF path).
    Preview,
    /// Attachment disposition — the original file is saved.
    Final,
}

/// Claims payload for a signed download token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadClaims {
    /// The file being fetched.
    pub file: Uuid,
    /// The specific version's storage path to serve.
    pub path: String,
    /// File name for the Content-Disposition header.
    pub name: String,
    /// Serving mode.
    pub mode: DownloadMode,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl DownloadClaims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// Signs and verifies download tokens.
#[derive(Clone)]
pub struct DownloadTokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_minutes: i64,
}

impl std::fmt::Debug for DownloadTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadTokenSigner")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl DownloadTokenSigner {
    /// Creates a new signer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_minutes: config.download_ttl_minutes as i64,
        }
    }

    /// Signs a download token for an already-authorized fetch.
    pub fn sign(
        &self,
        file_id: Uuid,
        storage_path: &str,
        name: &str,
        mode: DownloadMode,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let exp = Utc::now() + chrono::Duration::minutes(self.ttl_minutes);

        let claims = DownloadClaims {
            file: file_id,
            path: storage_path.to_string(),
            name: name.to_string(),
            mode,
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign download token: {e}")))?;

        Ok((token, exp))
    }

    /// Verifies a download token, returning its claims.
    pub fn verify(&self, token: &str) -> Result<DownloadClaims, AppError> {
        decode::<DownloadClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Download link has expired")
                }
                _ => AppError::unauthorized("Invalid download link"),
            })
    }
}
