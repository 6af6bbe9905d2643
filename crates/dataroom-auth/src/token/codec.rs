//! Guest session token encoding and validation.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use dataroom_core::config::auth::AuthConfig;
use dataroom_core::error::AppError;

use super::claims::GuestSessionClaims;

/// Creates and validates signed guest session tokens.
#[derive(Clone)]
pub struct SessionTokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Session TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl SessionTokenCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // clock-skew leeway, seconds

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl_minutes: config.session_ttl_minutes as i64,
        }
    }

    /// Issues a session token for a verified guest.
    pub fn issue(
        &self,
        guest_id: Uuid,
        room_id: Uuid,
        email: &str,
        nda_version: i32,
    ) -> Result<(String, GuestSessionClaims), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = GuestSessionClaims {
            sub: guest_id,
            room: room_id,
            email: email.to_string(),
            nda: nda_version,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok((token, claims))
    }

    /// Decodes and validates a session token string.
    pub fn verify(&self, token: &str) -> Result<GuestSessionClaims, AppError> {
        decode::<GuestSessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Session expired. Please verify again.")
                }
                _ => AppError::unauthorized("Invalid session token"),
            })
    }
}
