// ABOUTME: Integration tests for the JSON users-file credential store behind the token issuer
// ABOUTME: Verifies per-lookup re-reads and that outages surface as store failures, not bad logins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::Duration;
use rolegate::auth::TokenIssuer;
use rolegate::errors::AuthError;
use rolegate::models::Role;
use rolegate::password::{hash_password, MIN_COST};
use rolegate::store::{CredentialStore, JsonFileCredentialStore};
use std::sync::Arc;
use tempfile::TempDir;

fn write_users(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("users.json");
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_file_edits_apply_to_next_login() -> Result<()> {
    common::init_test_logging();
    let dir = TempDir::new()?;
    let hash = hash_password("first-password", MIN_COST)?;
    let path = write_users(
        &dir,
        &format!(r#"[{{"username": "ops", "password_hash": "{hash}", "role": "admin"}}]"#),
    );

    let store: Arc<dyn CredentialStore> = Arc::new(JsonFileCredentialStore::new(&path, MIN_COST));
    let issuer = TokenIssuer::new(Arc::clone(&store), &common::test_secret(), Duration::hours(1))
        .with_bcrypt_cost(MIN_COST);

    let issued = issuer.issue("ops", "first-password").await?;
    assert_eq!(issued.role(), Role::Admin);

    let new_hash = hash_password("second-password", MIN_COST)?;
    write_users(
        &dir,
        &format!(r#"[{{"username": "ops", "password_hash": "{new_hash}", "role": "user"}}]"#),
    );

    assert_eq!(
        issuer.issue("ops", "first-password").await.unwrap_err(),
        AuthError::InvalidCredentials
    );
    let issued = issuer.issue("ops", "second-password").await?;
    assert_eq!(issued.role(), Role::User);
    Ok(())
}

#[tokio::test]
async fn test_unreadable_store_is_not_invalid_credentials() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_users(&dir, r#"[{"username": "ops", "role": "admin"}]"#);

    let store = Arc::new(JsonFileCredentialStore::new(&path, MIN_COST));
    let issuer = TokenIssuer::new(store, &common::test_secret(), Duration::hours(1));

    let err = issuer.issue("ops", "anything").await.unwrap_err();
    assert!(matches!(err, AuthError::StoreUnavailable { .. }), "{err:?}");

    std::fs::remove_file(&path)?;
    let err = issuer.issue("ops", "anything").await.unwrap_err();
    assert!(matches!(err, AuthError::StoreUnavailable { .. }), "{err:?}");
    Ok(())
}
