// ABOUTME: Authentication and authorization error taxonomy for the session core
// ABOUTME: Typed failures for issuance, validation, and role gating with AppError conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication Error Types
//!
//! Every failure of the session core is one of these variants, surfaced
//! immediately to the caller. Nothing here is retried and nothing is fatal to
//! the process: each error is scoped to the request that produced it.
//!
//! `ExpiredToken` is kept apart from `MalformedOrTamperedToken` so clients can
//! show "please log in again" rather than "invalid session", and `RoleMismatch`
//! is kept apart from every authentication failure so an under-privileged but
//! authenticated caller is never told to re-login.

use super::{AppError, ErrorCode};
use crate::models::Role;
use chrono::{DateTime, Utc};

/// Failures of credential verification, token validation, and authorization
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Username or password was empty
    #[error("username and password are required")]
    MissingCredentials,
    /// Unknown username or wrong password
    #[error("invalid username or password")]
    InvalidCredentials,
    /// No token was presented on the request
    #[error("no session token presented")]
    MissingToken,
    /// Signature verification or decoding failed
    #[error("session token is malformed or has been tampered with: {details}")]
    MalformedOrTamperedToken {
        /// What failed; for logs only, never returned to clients
        details: String,
    },
    /// Signature is valid but the token is past its expiry
    #[error("session token expired at {}", expired_at.to_rfc3339())]
    ExpiredToken {
        /// Expiry instant carried by the token
        expired_at: DateTime<Utc>,
    },
    /// Authenticated, but the resource requires a different role
    #[error("access denied: {required} role required, session has {actual}")]
    RoleMismatch {
        /// Role the resource declares
        required: Role,
        /// Role carried by the session
        actual: Role,
    },
    /// The credential store could not be read
    #[error("credential store unavailable: {reason}")]
    StoreUnavailable {
        /// Underlying cause
        reason: String,
    },
    /// Token encoding failed
    #[error("failed to sign session token: {reason}")]
    TokenSigning {
        /// Underlying cause
        reason: String,
    },
}

impl AuthError {
    /// Create a malformed/tampered token error
    #[must_use]
    pub fn malformed(details: impl Into<String>) -> Self {
        Self::MalformedOrTamperedToken {
            details: details.into(),
        }
    }

    /// Create a store-unavailable error
    #[must_use]
    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a token-signing error
    #[must_use]
    pub fn signing(reason: impl Into<String>) -> Self {
        Self::TokenSigning {
            reason: reason.into(),
        }
    }

    /// Whether the failure is an expired (but otherwise genuine) token
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::ExpiredToken { .. })
    }

    /// Whether the caller must authenticate again to proceed
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::MissingToken
                | Self::MalformedOrTamperedToken { .. }
                | Self::ExpiredToken { .. }
        )
    }

    /// Standard error code for this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingCredentials => ErrorCode::MissingRequiredField,
            Self::InvalidCredentials => ErrorCode::AuthInvalid,
            Self::MissingToken => ErrorCode::AuthRequired,
            Self::MalformedOrTamperedToken { .. } => ErrorCode::AuthMalformed,
            Self::ExpiredToken { .. } => ErrorCode::AuthExpired,
            Self::RoleMismatch { .. } => ErrorCode::PermissionDenied,
            Self::StoreUnavailable { .. } => ErrorCode::ResourceUnavailable,
            Self::TokenSigning { .. } => ErrorCode::InternalError,
        }
    }

    /// Message safe to return to clients
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::MissingCredentials => "Username and password are required".to_owned(),
            Self::InvalidCredentials => "Invalid username or password".to_owned(),
            Self::MissingToken => "No token provided. Please login.".to_owned(),
            Self::MalformedOrTamperedToken { .. } => "Invalid token. Please login again.".to_owned(),
            Self::ExpiredToken { .. } => {
                "Your session has expired. Please login again.".to_owned()
            }
            Self::RoleMismatch { required, .. } => {
                let label = match required {
                    Role::Admin => "Admin",
                    Role::User => "User",
                };
                format!("Access denied. {label} role required.")
            }
            Self::StoreUnavailable { .. } => {
                "Credential store is temporarily unavailable".to_owned()
            }
            Self::TokenSigning { .. } => "Failed to create session".to_owned(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        Self::new(error.code(), error.client_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_is_distinct_from_malformed() {
        let expired = AuthError::ExpiredToken {
            expired_at: Utc::now(),
        };
        let malformed = AuthError::malformed("bad signature");

        assert!(expired.is_expired());
        assert!(!malformed.is_expired());
        assert_ne!(expired.code(), malformed.code());
        assert_eq!(expired.code().http_status(), 401);
        assert_eq!(malformed.code().http_status(), 401);
    }

    #[test]
    fn test_role_mismatch_is_not_a_login_failure() {
        let denied = AuthError::RoleMismatch {
            required: Role::Admin,
            actual: Role::User,
        };
        assert!(!denied.requires_login());
        assert_eq!(denied.code().http_status(), 403);
        assert_eq!(denied.client_message(), "Access denied. Admin role required.");
    }

    #[test]
    fn test_client_message_hides_details() {
        let app: AppError = AuthError::malformed("InvalidSignature at byte 12").into();
        assert_eq!(app.code, ErrorCode::AuthMalformed);
        assert!(!app.message.contains("byte 12"));
    }
}
