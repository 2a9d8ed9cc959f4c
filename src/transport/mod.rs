// ABOUTME: Session transport strategies carrying tokens between client and server
// ABOUTME: Cookie and bearer implementations behind one trait; exactly one is active per deployment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Transport
//!
//! A transport decides where the token lives between requests:
//!
//! - [`CookieTransport`] sets an `HttpOnly`, `SameSite=Strict` cookie on login
//!   and clears it on logout. The server is the authority for ending the session.
//! - [`BearerTransport`] hands the token back in the login body and expects an
//!   `Authorization: Bearer` header afterwards. Logout is client-side only: the
//!   token stays cryptographically valid until it expires.

/// Bearer header strategy
pub mod bearer;

/// Cookie strategy
pub mod cookie;

pub use bearer::BearerTransport;
pub use cookie::CookieTransport;

use crate::auth::IssuedToken;
use crate::config::environment::AuthConfig;
use crate::constants::session;
use crate::errors::AppError;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which transport strategy a deployment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// `HttpOnly` session cookie
    #[default]
    Cookie,
    /// `Authorization: Bearer` header
    Bearer,
}

impl TransportKind {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cookie => "cookie",
            Self::Bearer => "bearer",
        }
    }

    /// Token lifetime used when none is configured
    #[must_use]
    pub const fn default_ttl_secs(self) -> u64 {
        match self {
            Self::Cookie => session::COOKIE_TOKEN_TTL_SECS,
            Self::Bearer => session::BEARER_TOKEN_TTL_SECS,
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cookie" => Ok(Self::Cookie),
            "bearer" => Ok(Self::Bearer),
            other => Err(AppError::invalid_input(format!(
                "unknown session transport '{other}' (expected 'cookie' or 'bearer')"
            ))),
        }
    }
}

/// What logging out achieved on the server side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutEffect {
    /// The server instructed the client to drop the token
    ServerCleared,
    /// Nothing server-side; the client must discard its copy
    ClientSideOnly,
}

impl LogoutEffect {
    /// Whether the server ended the session itself
    #[must_use]
    pub const fn server_cleared(self) -> bool {
        matches!(self, Self::ServerCleared)
    }
}

/// Carries a session token between client and server
pub trait SessionTransport: Send + Sync {
    /// Strategy identifier
    fn kind(&self) -> TransportKind;

    /// Pull the presented token out of request headers, if any
    fn extract(&self, headers: &HeaderMap) -> Option<String>;

    /// Attach a freshly issued token to the login response
    fn attach(&self, headers: &mut HeaderMap, issued: &IssuedToken);

    /// End the session on the response to a logout request
    fn clear(&self, headers: &mut HeaderMap) -> LogoutEffect;

    /// Whether the login response body must carry the token
    fn token_in_body(&self) -> bool;
}

/// Build the single transport configured for this deployment
#[must_use]
pub fn build_transport(config: &AuthConfig) -> Arc<dyn SessionTransport> {
    match config.transport {
        TransportKind::Cookie => Arc::new(CookieTransport::new(
            config.cookie_name.clone(),
            config.cookie_secure,
        )),
        TransportKind::Bearer => Arc::new(BearerTransport),
    }
}
