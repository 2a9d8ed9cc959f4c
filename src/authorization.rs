// ABOUTME: Authorization gate comparing a session's role with a resource's required role
// ABOUTME: Pure equality check; roles are flat with no hierarchy or multi-role resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::Claims;
use crate::errors::AuthError;
use crate::models::Role;

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The session carries the required role
    Allow,
    /// The session is authenticated but carries a different role
    Deny,
}

impl Decision {
    /// Whether access is granted
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Allow iff `claims.role == required`
#[must_use]
pub fn authorize(claims: &Claims, required: Role) -> Decision {
    if claims.role == required {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// [`authorize`] as a `Result` for use with `?`
///
/// # Errors
///
/// Returns [`AuthError::RoleMismatch`] when the roles differ
pub fn require_role(claims: &Claims, required: Role) -> Result<(), AuthError> {
    match authorize(claims, required) {
        Decision::Allow => Ok(()),
        Decision::Deny => {
            tracing::warn!(
                username = %claims.sub,
                required = %required,
                actual = %claims.role,
                "role mismatch"
            );
            Err(AuthError::RoleMismatch {
                required,
                actual: claims.role,
            })
        }
    }
}
