// ABOUTME: Token issuer verifying credentials against the store and minting signed session tokens
// ABOUTME: Produces HS256 tokens carrying username, role, issue time, expiry, and a unique id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::claims::{Claims, IssuedToken};
use super::secret::SigningSecret;
use crate::constants::service_names;
use crate::errors::AuthError;
use crate::models::CredentialRecord;
use crate::password::{self, hash_password, verify_password};
use crate::store::CredentialStore;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::task;
use uuid::Uuid;

/// Issues session tokens for verified credentials.
///
/// Issuance has no side effect beyond creating the token: nothing about the
/// session is persisted server-side.
#[derive(Clone)]
pub struct TokenIssuer {
    store: Arc<dyn CredentialStore>,
    encoding_key: EncodingKey,
    ttl: Duration,
    bcrypt_cost: u32,
    // Verified against for unknown usernames so both failure paths cost one bcrypt check
    dummy_hash: Arc<OnceCell<Option<String>>>,
}

impl TokenIssuer {
    /// Create an issuer over `store` minting tokens that live for `ttl`
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, secret: &SigningSecret, ttl: Duration) -> Self {
        Self {
            store,
            encoding_key: secret.encoding_key(),
            ttl,
            bcrypt_cost: password::DEFAULT_COST,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Override the bcrypt cost used for the unknown-user comparison hash
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self.dummy_hash = Arc::new(OnceCell::new());
        self
    }

    /// Token lifetime
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Verify `username`/`password` and mint a token valid from now
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] if either field is empty
    /// - [`AuthError::InvalidCredentials`] for an unknown user or wrong password
    /// - [`AuthError::StoreUnavailable`] if the store cannot be read
    /// - [`AuthError::TokenSigning`] if encoding fails
    pub async fn issue(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(username, password, Utc::now()).await
    }

    /// Verify credentials and mint a token as if the current time were `now`
    ///
    /// # Errors
    ///
    /// Same as [`Self::issue`]
    #[tracing::instrument(skip(self, password, now), fields(backend = self.store.backend_name()))]
    pub async fn issue_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        if username.is_empty() || password.is_empty() {
            tracing::debug!("login rejected: empty username or password");
            return Err(AuthError::MissingCredentials);
        }

        let Some(record) = self.store.lookup(username).await? else {
            self.burn_unknown_user_check(password).await;
            tracing::warn!("login failed: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &record.password_hash).await? {
            tracing::warn!("login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.mint(&record, now)?;
        tracing::info!(
            role = %issued.claims.role,
            expires_at = %issued.expires_at().to_rfc3339(),
            "session token issued"
        );
        Ok(issued)
    }

    /// Sign a token for an already-verified record
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenSigning`] if the expiry is not representable or
    /// `JWT` encoding fails
    pub fn mint(
        &self,
        record: &CredentialRecord,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expiry = now.checked_add_signed(self.ttl).ok_or_else(|| {
            AuthError::signing(format!(
                "token lifetime of {}s overflows the expiry timestamp",
                self.ttl.num_seconds()
            ))
        })?;
        let claims = Claims {
            sub: record.username.clone(),
            role: record.role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: service_names::ROLEGATE_SERVER.to_owned(),
            aud: service_names::SESSION_API.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::signing(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    async fn burn_unknown_user_check(&self, password: &str) {
        let cost = self.bcrypt_cost;
        let dummy = self
            .dummy_hash
            .get_or_init(|| async move {
                task::spawn_blocking(move || hash_password("rolegate-unknown-user", cost).ok())
                    .await
                    .ok()
                    .flatten()
            })
            .await;
        if let Some(hash) = dummy {
            // Outcome is irrelevant; only the elapsed time matters
            let _ = verify_password(password, hash).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenValidator;
    use crate::models::Role;
    use crate::password::MIN_COST;
    use crate::store::{demo_users, InMemoryCredentialStore};

    fn issuer() -> (TokenIssuer, TokenValidator) {
        let store = InMemoryCredentialStore::from_sources(&demo_users(), MIN_COST).unwrap();
        let secret = SigningSecret::new("unit-test-signing-secret-0123456789abcdef").unwrap();
        let issuer =
            TokenIssuer::new(Arc::new(store), &secret, Duration::minutes(30)).with_bcrypt_cost(MIN_COST);
        (issuer, TokenValidator::new(&secret))
    }

    #[tokio::test]
    async fn test_issue_sets_claims_from_record() {
        let (issuer, validator) = issuer();
        let now = Utc::now();
        let issued = issuer.issue_at("admin", "admin123", now).await.unwrap();

        assert_eq!(issued.claims.sub, "admin");
        assert_eq!(issued.claims.role, Role::Admin);
        assert_eq!(issued.claims.iat, now.timestamp());
        assert_eq!(issued.claims.exp, (now + Duration::minutes(30)).timestamp());

        let claims = validator.validate_at(Some(&issued.token), now).unwrap();
        assert_eq!(claims, issued.claims);
    }

    #[tokio::test]
    async fn test_each_token_has_unique_id() {
        let (issuer, _) = issuer();
        let now = Utc::now();
        let a = issuer.issue_at("user", "user123", now).await.unwrap();
        let b = issuer.issue_at("user", "user123", now).await.unwrap();
        assert_ne!(a.claims.jti, b.claims.jti);
        assert_ne!(a.token, b.token);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let (issuer, _) = issuer();
        let wrong = issuer.issue("admin", "nope").await.unwrap_err();
        let unknown = issuer.issue("ghost", "admin123").await.unwrap_err();
        assert_eq!(wrong, AuthError::InvalidCredentials);
        assert_eq!(unknown, AuthError::InvalidCredentials);
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let store = InMemoryCredentialStore::from_sources(&demo_users(), MIN_COST).unwrap();
        let secret = SigningSecret::new("unit-test-signing-secret-0123456789abcdef").unwrap();
        let ttl = Duration::seconds(10_000_000_000_000);
        let issuer = TokenIssuer::new(Arc::new(store), &secret, ttl);

        let record = CredentialRecord::new("admin", "unused", Role::Admin);
        let err = issuer.mint(&record, Utc::now()).unwrap_err();
        assert!(matches!(err, AuthError::TokenSigning { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_password_sharing_first_72_bytes_is_rejected() {
        let stored = "a".repeat(crate::password::MAX_PASSWORD_BYTES);
        let hash = crate::password::hash_password(&stored, MIN_COST).unwrap();
        let store =
            InMemoryCredentialStore::from_records([CredentialRecord::new("long", hash, Role::User)])
                .unwrap();
        let secret = SigningSecret::new("unit-test-signing-secret-0123456789abcdef").unwrap();
        let issuer = TokenIssuer::new(Arc::new(store), &secret, Duration::minutes(30))
            .with_bcrypt_cost(MIN_COST);

        assert!(issuer.issue("long", &stored).await.is_ok());
        assert_eq!(
            issuer.issue("long", &format!("{stored}WRONG")).await.unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unknown_user_on_single_threaded_runtime() {
        let (issuer, _) = issuer();
        for _ in 0..2 {
            assert_eq!(
                issuer.issue("ghost", "whatever").await.unwrap_err(),
                AuthError::InvalidCredentials
            );
        }
        assert!(issuer.dummy_hash.get().is_some_and(Option::is_some));
    }

    #[tokio::test]
    async fn test_empty_fields_rejected_before_lookup() {
        let (issuer, _) = issuer();
        assert_eq!(
            issuer.issue("", "admin123").await.unwrap_err(),
            AuthError::MissingCredentials
        );
        assert_eq!(
            issuer.issue("admin", "").await.unwrap_err(),
            AuthError::MissingCredentials
        );
    }
}
