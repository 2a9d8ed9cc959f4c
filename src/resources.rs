// ABOUTME: Shared server context built once at startup and handed to every route
// ABOUTME: Holds the issuer, authenticator, transport, credential store, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Everything a request needs is constructed here and passed in explicitly.
//! There is no module-level signing secret or user table: two servers with
//! different secrets and stores can run side by side in one process.

use crate::auth::{SigningSecret, TokenIssuer, TokenValidator};
use crate::config::environment::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::middleware::SessionAuthenticator;
use crate::store::{demo_users, CredentialStore, InMemoryCredentialStore, JsonFileCredentialStore};
use crate::transport::{build_transport, SessionTransport};
use std::sync::Arc;
use tracing::info;

/// Immutable context shared by all request handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Credential lookup backend
    pub store: Arc<dyn CredentialStore>,
    /// Mints tokens on login
    pub issuer: TokenIssuer,
    /// Validates and authorizes presented tokens
    pub authenticator: SessionAuthenticator,
    /// The deployment's single session transport
    pub transport: Arc<dyn SessionTransport>,
}

impl ServerResources {
    /// Wire the session pipeline over `store` according to `config`
    ///
    /// # Errors
    ///
    /// Returns a config error if the configured signing secret is unusable
    pub fn new(config: ServerConfig, store: Arc<dyn CredentialStore>) -> AppResult<Self> {
        let secret = match &config.auth.jwt_secret {
            Some(secret) => SigningSecret::new(secret)?,
            None => {
                AppLogger::log_security_event(
                    "ephemeral_signing_secret",
                    "medium",
                    "JWT_SECRET not set; sessions will not survive a restart",
                    None,
                );
                SigningSecret::generate()
            }
        };

        let transport = build_transport(&config.auth);
        let issuer = TokenIssuer::new(Arc::clone(&store), &secret, config.auth.token_ttl())
            .with_bcrypt_cost(config.auth.bcrypt_cost);
        let authenticator =
            SessionAuthenticator::new(TokenValidator::new(&secret), Arc::clone(&transport));

        info!(
            transport = %transport.kind(),
            ttl_secs = config.auth.ttl_secs(),
            store = store.backend_name(),
            "session pipeline ready"
        );

        Ok(Self {
            config: Arc::new(config),
            store,
            issuer,
            authenticator,
            transport,
        })
    }

    /// Build resources including the credential store named by `config`
    ///
    /// # Errors
    ///
    /// Returns a config error if no users file is configured in production or
    /// the demo accounts cannot be hashed
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let store = build_store(&config)?;
        Self::new(config, store)
    }
}

/// Select the credential store: the users file when configured, else the demo accounts
///
/// # Errors
///
/// Returns a config error in production without a users file
pub fn build_store(config: &ServerConfig) -> AppResult<Arc<dyn CredentialStore>> {
    if let Some(path) = &config.users_file {
        info!(path = %path.display(), "using JSON users file credential store");
        return Ok(Arc::new(JsonFileCredentialStore::new(
            path.clone(),
            config.auth.bcrypt_cost,
        )));
    }

    if config.environment.is_production() {
        return Err(AppError::config("USERS_FILE is required in production"));
    }

    AppLogger::log_security_event(
        "demo_credentials",
        "high",
        "USERS_FILE not set; serving the demo accounts admin/admin123 and user/user123",
        None,
    );
    let store = InMemoryCredentialStore::from_sources(&demo_users(), config.auth.bcrypt_cost)?;
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::Environment;
    use crate::password::MIN_COST;

    #[test]
    fn test_production_requires_users_file() {
        let mut config = ServerConfig::default();
        config.environment = Environment::Production;
        assert!(build_store(&config).is_err());
    }

    #[test]
    fn test_demo_store_outside_production() {
        let mut config = ServerConfig::default();
        config.auth.bcrypt_cost = MIN_COST;
        let resources = ServerResources::from_config(config).unwrap();
        assert_eq!(resources.store.backend_name(), "memory");
        assert!(!resources.transport.token_in_body());
    }
}
