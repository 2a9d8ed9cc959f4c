// ABOUTME: Credential store abstraction queried by the token issuer
// ABOUTME: Read-only username lookup with in-memory and JSON-file backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Credential Stores
//!
//! The issuer only ever asks one question: "which record has this exact
//! username?" Stores are never mutated through this interface. A backend that
//! cannot answer reports [`AuthError::StoreUnavailable`]; it must not answer
//! "not found" in that case, or an outage would look like a wrong password.

/// JSON users-file backend
pub mod file;

/// Immutable in-memory backend
pub mod memory;

pub use file::JsonFileCredentialStore;
pub use memory::InMemoryCredentialStore;

use crate::errors::AuthError;
use crate::models::{CredentialRecord, CredentialSource, Role};
use async_trait::async_trait;

/// Read-only lookup of credential records by exact, case-sensitive username
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the record for `username`
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StoreUnavailable`] if the backend cannot be read
    async fn lookup(&self, username: &str) -> Result<Option<CredentialRecord>, AuthError>;

    /// Check that the backend can currently be read
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StoreUnavailable`] if it cannot
    async fn probe(&self) -> Result<(), AuthError> {
        Ok(())
    }

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Demonstration accounts: `admin`/`admin123` and `user`/`user123`.
///
/// Only used outside production when no users file is configured.
#[must_use]
pub fn demo_users() -> Vec<CredentialSource> {
    vec![
        CredentialSource {
            username: "admin".to_owned(),
            password: Some("admin123".to_owned()),
            password_hash: None,
            role: Role::Admin,
        },
        CredentialSource {
            username: "user".to_owned(),
            password: Some("user123".to_owned()),
            password_hash: None,
            role: Role::User,
        },
    ]
}
