// ABOUTME: Core data models for roles and credential records
// ABOUTME: Defines the read-only records the credential store hands to the token issuer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried by a credential record and by every token minted for it.
///
/// Roles are flat: there is no hierarchy, and an admin is not implicitly a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator
    Admin,
    /// Regular user
    User,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Self; 2] = [Self::Admin, Self::User];

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Landing resource a client is redirected to after login
    #[must_use]
    pub const fn home_path(self) -> &'static str {
        match self {
            Self::Admin => "/api/admin/home",
            Self::User => "/api/user/home",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected 'admin' or 'user')")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(UnknownRole(s.to_owned())),
        }
    }
}

/// A credential as held by the store: the password is only ever a salted hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Unique, case-sensitive login name
    pub username: String,
    /// Bcrypt hash of the password
    pub password_hash: String,
    /// Role granted to sessions for this user
    pub role: Role,
}

impl CredentialRecord {
    /// Create a record from an already-hashed password
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role,
        }
    }
}

/// One entry of a users file.
///
/// Legacy files carry a plaintext `password`; those are hashed when loaded and
/// never kept in memory. New files should carry `password_hash` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialSource {
    /// Login name
    pub username: String,
    /// Plaintext password (legacy format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Bcrypt hash of the password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Granted role
    pub role: Role,
}

/// Secret carried by a [`CredentialSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSecret<'a> {
    /// Plaintext that still needs hashing
    Plaintext(&'a str),
    /// Bcrypt hash usable as-is
    Hash(&'a str),
}

impl CredentialSource {
    /// Which secret this entry carries
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StoreUnavailable`] if the entry carries both or neither secret,
    /// or has an empty username
    pub fn secret(&self) -> Result<SourceSecret<'_>, AuthError> {
        if self.username.is_empty() {
            return Err(AuthError::store_unavailable(
                "users file contains an entry with an empty username",
            ));
        }
        match (self.password.as_deref(), self.password_hash.as_deref()) {
            (Some(plain), None) if !plain.is_empty() => Ok(SourceSecret::Plaintext(plain)),
            (None, Some(hash)) if !hash.is_empty() => Ok(SourceSecret::Hash(hash)),
            _ => Err(AuthError::store_unavailable(format!(
                "entry for '{}' must carry exactly one non-empty 'password' or 'password_hash'",
                self.username
            ))),
        }
    }
}
