// ABOUTME: Cookie session transport storing the token in an HttpOnly SameSite=Strict cookie
// ABOUTME: The server sets the cookie on login and expires it on logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{LogoutEffect, SessionTransport, TransportKind};
use crate::auth::IssuedToken;
use crate::security::cookies::{
    clear_auth_cookie, get_cookie_value, set_auth_cookie, AuthCookiePolicy,
};
use axum::http::HeaderMap;

/// Token carried in a server-managed cookie
#[derive(Debug, Clone)]
pub struct CookieTransport {
    policy: AuthCookiePolicy,
}

impl CookieTransport {
    /// Cookie transport using cookie `name`; `secure` adds the `Secure` attribute
    #[must_use]
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            policy: AuthCookiePolicy {
                name: name.into(),
                secure,
            },
        }
    }
}

impl SessionTransport for CookieTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Cookie
    }

    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        get_cookie_value(headers, &self.policy.name).filter(|v| !v.is_empty())
    }

    fn attach(&self, headers: &mut HeaderMap, issued: &IssuedToken) {
        set_auth_cookie(
            headers,
            &self.policy,
            &issued.token,
            issued.claims.lifetime_secs(),
        );
    }

    fn clear(&self, headers: &mut HeaderMap) -> LogoutEffect {
        clear_auth_cookie(headers, &self.policy);
        LogoutEffect::ServerCleared
    }

    fn token_in_body(&self) -> bool {
        false
    }
}
