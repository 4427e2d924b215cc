//! Argon2id password hashing for stored user credentials

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("could not hash password: {0}")]
    HashFailed(String),
    /// The stored value is not a PHC string or uses unsupported parameters.
    #[error("stored password hash is unusable: {0}")]
    MalformedHash(String),
}

pub struct PasswordService;

impl PasswordService {
    /// Returns a PHC string with a fresh random salt.
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashFailed(e.to_string()))
    }

    /// `Ok(false)` only for a wrong password. Any other failure means the
    /// stored hash cannot be checked at all.
    pub fn verify(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}
