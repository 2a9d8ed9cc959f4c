// ABOUTME: Token validator checking HS256 signatures and expiry of presented session tokens
// ABOUTME: Pure function of token, signing secret, and clock; distinguishes expired from tampered
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::claims::Claims;
use super::secret::SigningSecret;
use crate::constants::service_names;
use crate::errors::AuthError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

/// Convert a duration to a human-readable format
fn humanize_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours} hours")
    } else if minutes > 0 {
        format!("{minutes} minutes")
    } else {
        format!("{total_secs} seconds")
    }
}

/// Validates session tokens.
///
/// Holds only the decoding key and validation rules; it performs no lookups
/// and never enriches the claims it returns.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator for tokens signed with `secret`
    #[must_use]
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `validate_at`
        validation.validate_exp = false;
        validation.set_audience(&[service_names::SESSION_API]);
        validation.set_issuer(&[service_names::ROLEGATE_SERVER]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "aud", "iss"]);

        Self {
            decoding_key: secret.decoding_key(),
            validation,
        }
    }

    /// Validate `token` against the current time
    ///
    /// # Errors
    ///
    /// See [`Self::validate_at`]
    pub fn validate(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate `token` as of `now`
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingToken`] if no (or an empty) token is presented
    /// - [`AuthError::MalformedOrTamperedToken`] if decoding or signature verification fails
    /// - [`AuthError::ExpiredToken`] if `now` is at or past the token's expiry
    pub fn validate_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Claims, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        tracing::debug!("validating session token (length: {} chars)", token.len());

        let claims = self.decode_claims(token)?;
        Self::check_expiry(&claims, now)?;

        tracing::debug!(username = %claims.sub, role = %claims.role, "session token valid");
        Ok(claims)
    }

    /// Decode and verify signature, without the expiry check
    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    fn check_expiry(claims: &Claims, now: DateTime<Utc>) -> Result<(), AuthError> {
        if claims.is_expired_at(now) {
            let expired_at = claims.expires_at();
            tracing::warn!(
                username = %claims.sub,
                "session token expired {} ago at {}",
                humanize_duration(now.signed_duration_since(expired_at)),
                expired_at.to_rfc3339()
            );
            return Err(AuthError::ExpiredToken { expired_at });
        }
        Ok(())
    }

    /// Convert `JWT` library errors into the tampered/malformed bucket with details for logs
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> AuthError {
        let details = match e.kind() {
            ErrorKind::InvalidSignature => "signature verification failed".to_owned(),
            ErrorKind::InvalidToken => "token format is invalid".to_owned(),
            ErrorKind::InvalidAlgorithm => "token uses an unexpected algorithm".to_owned(),
            ErrorKind::InvalidAudience => "token audience mismatch".to_owned(),
            ErrorKind::InvalidIssuer => "token issuer mismatch".to_owned(),
            ErrorKind::MissingRequiredClaim(claim) => format!("token is missing claim '{claim}'"),
            ErrorKind::Base64(err) => format!("token contains invalid base64: {err}"),
            ErrorKind::Json(err) => format!("token contains invalid JSON: {err}"),
            ErrorKind::Utf8(err) => format!("token contains invalid UTF-8: {err}"),
            _ => format!("token validation failed: {e}"),
        };
        tracing::warn!("session token rejected: {details}");
        AuthError::malformed(details)
    }
}
