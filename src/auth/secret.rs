// ABOUTME: Server signing secret for HS256 session tokens
// ABOUTME: Validates configured secrets, generates development secrets, and redacts Debug output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::secrets::{GENERATED_SECRET_LENGTH, MIN_SECRET_LENGTH};
use crate::errors::{AppError, AppResult};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rand::{distributions::Alphanumeric, Rng};
use std::fmt;
use std::sync::Arc;

/// The HMAC key every token is signed and verified with
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Arc<[u8]>,
}

impl SigningSecret {
    /// Wrap a configured secret
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the secret is empty
    pub fn new(secret: impl AsRef<[u8]>) -> AppResult<Self> {
        let bytes = secret.as_ref();
        if bytes.is_empty() {
            return Err(AppError::config("JWT signing secret must not be empty"));
        }
        if bytes.len() < MIN_SECRET_LENGTH {
            tracing::warn!(
                "JWT signing secret is shorter than {MIN_SECRET_LENGTH} bytes; use a longer secret in production"
            );
        }
        Ok(Self {
            bytes: Arc::from(bytes),
        })
    }

    /// Generate a random alphanumeric secret
    #[must_use]
    pub fn generate() -> Self {
        let secret: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_SECRET_LENGTH)
            .map(char::from)
            .collect();
        Self {
            bytes: Arc::from(secret.as_bytes()),
        }
    }

    /// Secret length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: empty secrets are rejected at construction
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.bytes)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.bytes)
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
