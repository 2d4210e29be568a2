//! Password hashing and verification.
//!
//! Stored hashes have the form `base64(salt)$base64(digest)` where the
//! digest is SHA-256 over the salt followed by the password bytes.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::{AuthError, AuthResult};

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut rng = rand::rng();
    let salt: Vec<u8> = (0..SALT_LEN).map(|_| rng.random::<u8>()).collect();
    let digest = digest_with_salt(&salt, password);

    format!(
        "{}${}",
        URL_SAFE_NO_PAD.encode(&salt),
        URL_SAFE_NO_PAD.encode(digest)
    )
}

/// Verifies a password against a stored hash.
pub fn verify_password(password: &str, stored: &str) -> AuthResult<bool> {
    let (salt, digest) = stored.split_once('$').ok_or(AuthError::MalformedHash)?;
    let salt = URL_SAFE_NO_PAD
        .decode(salt)
        .map_err(|_| AuthError::MalformedHash)?;
    let digest = URL_SAFE_NO_PAD
        .decode(digest)
        .map_err(|_| AuthError::MalformedHash)?;

    Ok(digest_with_salt(&salt, password) == digest)
}

fn digest_with_salt(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}
