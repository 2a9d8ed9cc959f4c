// ABOUTME: Salted bcrypt password hashing and verification for the credential stores
// ABOUTME: Runs verification on the blocking pool so a login never stalls the async runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Credentials are compared by bcrypt verification, never by plaintext
//! equality. Verification costs tens of milliseconds by design, so it runs
//! through `spawn_blocking`.

use crate::errors::AuthError;
use tokio::task;

/// Bcrypt cost used when none is configured
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Cheapest cost bcrypt accepts; for tests and benchmarks only
pub const MIN_COST: u32 = 4;

/// Longest password bcrypt reads; anything past this byte would be ignored
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a plaintext password with a fresh random salt
///
/// # Errors
///
/// Returns [`AuthError::StoreUnavailable`] if the password is longer than
/// [`MAX_PASSWORD_BYTES`] or the cost is outside bcrypt's range
pub fn hash_password(plain: &str, cost: u32) -> Result<String, AuthError> {
    if plain.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::store_unavailable(format!(
            "password is {} bytes; at most {MAX_PASSWORD_BYTES} are supported",
            plain.len()
        )));
    }
    bcrypt::hash(plain, cost)
        .map_err(|e| AuthError::store_unavailable(format!("failed to hash password: {e}")))
}

/// Verify a plaintext password against a stored bcrypt hash
///
/// A password longer than [`MAX_PASSWORD_BYTES`] never matches: bcrypt would
/// compare only its prefix.
///
/// # Errors
///
/// Returns [`AuthError::StoreUnavailable`] if the stored hash is unreadable or the
/// verification task could not run
pub async fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    if plain.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    let plain = plain.to_owned();
    let hash = hash.to_owned();
    task::spawn_blocking(move || bcrypt::verify(&plain, &hash))
        .await
        .map_err(|e| AuthError::store_unavailable(format!("password verification task failed: {e}")))?
        .map_err(|e| AuthError::store_unavailable(format!("stored password hash is unreadable: {e}")))
}
