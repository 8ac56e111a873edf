//! Password hashing with argon2id.
//!
//! Hashing and verification are CPU-bound (tens of milliseconds), so the async
//! entry points run them on the blocking pool.

use std::sync::LazyLock;

use anyhow::{Context as _, anyhow};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::RngExt;

use crate::error::AuthServiceError;

const SALT_LEN: usize = 16;

/// Hash compared against when no credential exists, so unknown emails cost
/// the same as wrong passwords.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("flocky-dummy-password").ok());

/// Hash `plain` with a fresh random salt, returning the PHC string.
pub fn hash_password(plain: &str) -> Result<String, AuthServiceError> {
    let salt_bytes: [u8; SALT_LEN] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!("encode salt: {e}"))?;
    let phc = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?
        .to_string();
    Ok(phc)
}

/// Constant-work comparison of `plain` against a PHC string. An unparsable
/// hash never matches.
pub fn verify_password(plain: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub async fn hash(plain: String) -> Result<String, AuthServiceError> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("join password hashing task")?
}

/// Verify `plain` against `phc`. With no stored hash the dummy hash is checked
/// instead and the result is always `false`.
pub async fn verify(plain: String, phc: Option<String>) -> Result<bool, AuthServiceError> {
    let matched = tokio::task::spawn_blocking(move || match phc {
        Some(phc) => verify_password(&plain, &phc),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(&plain, dummy);
            }
            false
        }
    })
    .await
    .context("join password verification task")?;
    Ok(matched)
}
