// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, fast-hashing stores, and server resources per transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `rolegate`

use rolegate::{
    auth::{SigningSecret, TokenIssuer, TokenValidator},
    config::environment::ServerConfig,
    password::MIN_COST,
    resources::ServerResources,
    store::{demo_users, CredentialStore, InMemoryCredentialStore, JsonFileCredentialStore},
    transport::TransportKind,
};
use std::path::Path;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Secret shared by fixtures so tokens minted in one place validate in another
pub const TEST_SECRET: &str = "integration-test-signing-secret-0123456789abcdef";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Demo accounts hashed at the cheapest bcrypt cost
pub fn demo_store() -> Arc<dyn CredentialStore> {
    Arc::new(InMemoryCredentialStore::from_sources(&demo_users(), MIN_COST).unwrap())
}

pub fn test_secret() -> SigningSecret {
    SigningSecret::new(TEST_SECRET).unwrap()
}

/// Issuer and validator sharing [`TEST_SECRET`]
pub fn issuer_and_validator(ttl: chrono::Duration) -> (TokenIssuer, TokenValidator) {
    init_test_logging();
    let secret = test_secret();
    (
        TokenIssuer::new(demo_store(), &secret, ttl).with_bcrypt_cost(MIN_COST),
        TokenValidator::new(&secret),
    )
}

/// Configuration for an in-process server using `transport`
pub fn test_config(transport: TransportKind) -> ServerConfig {
    let mut config = ServerConfig::default().with_transport(transport);
    config.auth.jwt_secret = Some(TEST_SECRET.to_owned());
    config.auth.cookie_secure = false;
    config.auth.bcrypt_cost = MIN_COST;
    config
}

/// Server resources over the demo accounts
pub fn test_resources(transport: TransportKind) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(test_config(transport), demo_store()).unwrap())
}

/// Server resources reading credentials from the users file at `path`
pub fn file_store_resources(transport: TransportKind, path: &Path) -> Arc<ServerResources> {
    init_test_logging();
    let store = Arc::new(JsonFileCredentialStore::new(path, MIN_COST));
    Arc::new(ServerResources::new(test_config(transport), store).unwrap())
}
