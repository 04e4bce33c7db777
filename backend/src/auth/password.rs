//! Salted one-way password hashing with Argon2id.
//!
//! Cost parameters are fixed when the hasher is built. Both hashing and
//! verification are CPU-bound, so the async entry points move the work onto
//! tokio's blocking pool.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

use super::errors::AuthError;
use crate::config::HashCost;

#[derive(Clone)]
pub struct PasswordHashing {
    argon: Argon2<'static>,
}

impl PasswordHashing {
    pub fn new(cost: HashCost) -> Result<Self, AuthError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|err| AuthError::Internal(format!("invalid argon2 parameters: {err}")))?;
        Ok(Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash `plaintext` with a fresh random salt. Returns a PHC string.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| AuthError::Internal(format!("password hashing failed: {err}")))
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    pub fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|err| AuthError::Internal(format!("stored hash is malformed: {err}")))?;
        match self.argon.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(AuthError::Internal(format!("password verification failed: {err}"))),
        }
    }

    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, AuthError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|err| AuthError::Internal(format!("hashing task failed: {err}")))?
    }

    pub async fn verify_blocking(&self, plaintext: String, stored: String) -> Result<bool, AuthError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &stored))
            .await
            .map_err(|err| AuthError::Internal(format!("verification task failed: {err}")))?
    }
}
