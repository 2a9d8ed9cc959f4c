// ABOUTME: Bearer session transport returning the token in the login body
// ABOUTME: Reads `Authorization: Bearer` on later requests; logout has no server-side effect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{LogoutEffect, SessionTransport, TransportKind};
use crate::auth::IssuedToken;
use crate::constants::http_names;
use axum::http::{header, HeaderMap};

/// Token held by the client and presented as a bearer credential
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerTransport;

impl SessionTransport for BearerTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Bearer
    }

    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix(http_names::BEARER_PREFIX))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
    }

    fn attach(&self, _headers: &mut HeaderMap, _issued: &IssuedToken) {}

    fn clear(&self, _headers: &mut HeaderMap) -> LogoutEffect {
        // No revocation list: the token remains valid until it expires
        LogoutEffect::ClientSideOnly
    }

    fn token_in_body(&self) -> bool {
        true
    }
}
