// ABOUTME: JWT claims carried by session tokens and the envelope returned on issuance
// ABOUTME: Claims are immutable after minting; a new login replaces rather than updates a token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `JWT` claims for a user session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username the session belongs to
    pub sub: String,
    /// Role granted at login
    pub role: Role,
    /// Issued at (seconds since the epoch)
    pub iat: i64,
    /// Expiration (seconds since the epoch)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
    /// Issuer
    pub iss: String,
    /// Audience (who the token is intended for)
    pub aud: String,
}

impl Claims {
    /// Username the session belongs to
    #[must_use]
    pub fn username(&self) -> &str {
        &self.sub
    }

    /// Issue instant
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Expiry instant
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Whether the token is expired at `now`; the expiry instant itself counts as expired
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Lifetime granted at issuance, in seconds
    #[must_use]
    pub fn lifetime_secs(&self) -> i64 {
        (self.exp - self.iat).max(0)
    }
}

/// A freshly minted token together with the claims it encodes
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact `JWS` string handed to the transport
    pub token: String,
    /// Claims signed into `token`
    pub claims: Claims,
}

impl IssuedToken {
    /// Expiry instant of the token
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }

    /// Role the token grants
    #[must_use]
    pub const fn role(&self) -> Role {
        self.claims.role
    }
}
