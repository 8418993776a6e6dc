//! Password hashing.
//!
//! Argon2id via the PHC `password_hash` API. The stored record keeps the
//! salt alongside the digest and verification recomputes and compares; the
//! digest string itself is self-contained PHC format.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{Result, StoreError};

/// Salt + digest pair produced for a new or rotated password.
#[derive(Debug, Clone)]
pub struct HashedPassword {
    pub salt: String,
    pub digest: String,
}

/// Hashes a password with a freshly generated salt.
pub fn hash_password(password: &str) -> Result<HashedPassword> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::PasswordHash(e.to_string()))?
        .to_string();
    Ok(HashedPassword {
        salt: salt.as_str().to_string(),
        digest,
    })
}

/// Recomputes against the stored digest. A malformed stored digest counts
/// as a mismatch rather than an error, so authentication stays generic.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
