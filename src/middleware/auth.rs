// ABOUTME: Session authenticator composing transport extraction, token validation, and role checks
// ABOUTME: Called explicitly by handlers; never mutates the request or threads state implicitly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::{Claims, TokenValidator};
use crate::authorization::require_role;
use crate::errors::AuthError;
use crate::models::Role;
use crate::transport::SessionTransport;
use axum::http::HeaderMap;
use std::sync::Arc;

/// Two-step request pipeline: extract-and-validate, then authorize
#[derive(Clone)]
pub struct SessionAuthenticator {
    validator: TokenValidator,
    transport: Arc<dyn SessionTransport>,
}

impl SessionAuthenticator {
    /// Create an authenticator reading tokens through `transport`
    #[must_use]
    pub fn new(validator: TokenValidator, transport: Arc<dyn SessionTransport>) -> Self {
        Self {
            validator,
            transport,
        }
    }

    /// Extract the session token from `headers` and validate it
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingToken`], [`AuthError::MalformedOrTamperedToken`],
    /// or [`AuthError::ExpiredToken`]
    #[tracing::instrument(
        skip(self, headers),
        fields(
            transport = %self.transport.kind(),
            username = tracing::field::Empty,
            role = tracing::field::Empty,
            success = tracing::field::Empty,
        )
    )]
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = self.transport.extract(headers);
        match self.validator.validate(token.as_deref()) {
            Ok(claims) => {
                tracing::Span::current()
                    .record("username", claims.sub.as_str())
                    .record("role", claims.role.as_str())
                    .record("success", true);
                Ok(claims)
            }
            Err(e) => {
                tracing::Span::current().record("success", false);
                tracing::debug!("session authentication failed: {e}");
                Err(e)
            }
        }
    }

    /// Authenticate, then require the session to carry exactly `required`
    ///
    /// # Errors
    ///
    /// Any error of [`Self::authenticate`], or [`AuthError::RoleMismatch`]
    #[tracing::instrument(
        skip(self, headers),
        fields(
            transport = %self.transport.kind(),
            required = %required,
            username = tracing::field::Empty,
            role = tracing::field::Empty,
            success = tracing::field::Empty,
        )
    )]
    pub fn authorize(&self, headers: &HeaderMap, required: Role) -> Result<Claims, AuthError> {
        let claims = self.authenticate(headers)?;
        let span = tracing::Span::current();
        span.record("username", claims.sub.as_str())
            .record("role", claims.role.as_str());

        let outcome = require_role(&claims, required);
        span.record("success", outcome.is_ok());
        outcome.map(|()| claims)
    }
}
