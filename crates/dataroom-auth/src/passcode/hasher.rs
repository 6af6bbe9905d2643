//! Argon2id passcode hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use dataroom_core::error::AppError;

/// Handles one-time passcode hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasscodeHasher;

impl PasscodeHasher {
    /// Creates a new passcode hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext passcode using Argon2id with a random salt.
    pub fn hash(&self, passcode: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(passcode.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Passcode hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext passcode against a stored Argon2id hash.
    ///
    /// Returns `Ok(true)` if the passcode matches, `Ok(false)` if not.
    pub fn verify(&self, passcode: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid passcode hash format: {e}")))?;

        let argon2 = Argon2::default();
        match argon2.verify_password(passcode.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Passcode verification failed: {e}"
            ))),
        }
    }
}

impl Default for PasscodeHasher {
    fn default() -> Self {
        Self::new()
    }
}
