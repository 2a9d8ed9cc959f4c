// ABOUTME: Secure cookie builders and parsers for the session cookie
// ABOUTME: Emits HttpOnly, SameSite=Strict cookies and reads them back from request headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::http_names;
use axum::http::{header, HeaderMap, HeaderValue};

/// Attributes of a single `Set-Cookie` header
#[derive(Debug, Clone)]
pub struct SecureCookieConfig {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Lifetime in seconds; zero instructs the client to drop the cookie
    pub max_age_secs: i64,
    /// Hide the cookie from client-side script
    pub http_only: bool,
    /// Only send over `HTTPS`
    pub secure: bool,
    /// `SameSite` attribute value
    pub same_site: &'static str,
    /// Path the cookie is scoped to
    pub path: &'static str,
}

impl SecureCookieConfig {
    /// Hardened defaults: `HttpOnly`, `Secure`, `SameSite=Strict`, `Path=/`
    #[must_use]
    pub const fn new(name: String, value: String, max_age_secs: i64) -> Self {
        Self {
            name,
            value,
            max_age_secs,
            http_only: true,
            secure: true,
            same_site: "Strict",
            path: "/",
        }
    }

    /// Toggle the `Secure` attribute (plain-HTTP development only)
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Render the `Set-Cookie` header value
    #[must_use]
    pub fn build(&self) -> String {
        let mut cookie = format!(
            "{}={}; Path={}; Max-Age={}; SameSite={}",
            self.name, self.value, self.path, self.max_age_secs, self.same_site
        );
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    fn append_to(&self, headers: &mut HeaderMap) {
        match HeaderValue::from_str(&self.build()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => {
                tracing::error!(cookie = %self.name, "refusing to emit invalid cookie header: {e}");
            }
        }
    }
}

/// Name and `Secure` flag of the session cookie
#[derive(Debug, Clone)]
pub struct AuthCookiePolicy {
    /// Cookie name
    pub name: String,
    /// Emit the `Secure` attribute
    pub secure: bool,
}

impl Default for AuthCookiePolicy {
    fn default() -> Self {
        Self {
            name: http_names::AUTH_COOKIE.to_owned(),
            secure: true,
        }
    }
}

/// Set the session cookie carrying `token` for `max_age_secs`
pub fn set_auth_cookie(
    headers: &mut HeaderMap,
    policy: &AuthCookiePolicy,
    token: &str,
    max_age_secs: i64,
) {
    SecureCookieConfig::new(policy.name.clone(), token.to_owned(), max_age_secs)
        .with_secure(policy.secure)
        .append_to(headers);
}

/// Instruct the client to discard the session cookie
pub fn clear_auth_cookie(headers: &mut HeaderMap, policy: &AuthCookiePolicy) {
    SecureCookieConfig::new(policy.name.clone(), String::new(), 0)
        .with_secure(policy.secure)
        .append_to(headers);
}

/// Read cookie `name` from the request `Cookie` headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}
