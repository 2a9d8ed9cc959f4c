// ABOUTME: Property and scenario tests for token issuance, validation, and role gating
// ABOUTME: Covers the expiry boundary, tamper detection, and the demo admin/user login flows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rolegate::authorization::{authorize, Decision};
use rolegate::errors::AuthError;
use rolegate::models::Role;

fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_750_000_000, 0).unwrap()
}

#[tokio::test]
async fn test_every_stored_account_round_trips() -> Result<()> {
    let (issuer, validator) = common::issuer_and_validator(Duration::minutes(30));

    for (username, password, role) in [
        ("admin", "admin123", Role::Admin),
        ("user", "user123", Role::User),
    ] {
        let issued = issuer.issue(username, password).await?;
        let claims = validator.validate(Some(&issued.token))?;
        assert_eq!(claims.sub, username);
        assert_eq!(claims.role, role);
        assert_eq!(claims, issued.claims, "validator must not enrich claims");
    }
    Ok(())
}

#[tokio::test]
async fn test_bad_credentials_never_yield_a_token() {
    let (issuer, _) = common::issuer_and_validator(Duration::minutes(30));

    for (username, password) in [
        ("admin", "user123"),
        ("user", "admin123"),
        ("Admin", "admin123"),
        ("root", "admin123"),
        ("admin", "admin1234"),
        ("admin ", "admin123"),
    ] {
        let result = issuer.issue(username, password).await;
        assert_eq!(
            result.unwrap_err(),
            AuthError::InvalidCredentials,
            "{username:?}/{password:?}"
        );
    }
}

#[tokio::test]
async fn test_expiry_boundary_is_inclusive() -> Result<()> {
    let (issuer, validator) = common::issuer_and_validator(Duration::minutes(30));
    let issued = issuer.issue_at("user", "user123", fixed_now()).await?;
    let expires_at = issued.expires_at();
    assert_eq!(expires_at, fixed_now() + Duration::minutes(30));

    assert!(validator
        .validate_at(Some(&issued.token), expires_at - Duration::seconds(1))
        .is_ok());

    for at in [expires_at, expires_at + Duration::seconds(1), expires_at + Duration::days(1)] {
        let err = validator.validate_at(Some(&issued.token), at).unwrap_err();
        assert_eq!(err, AuthError::ExpiredToken { expired_at: expires_at });
    }
    Ok(())
}

#[tokio::test]
async fn test_any_altered_character_is_detected() -> Result<()> {
    let (issuer, validator) = common::issuer_and_validator(Duration::hours(24));
    let now = fixed_now();
    let token = issuer.issue_at("admin", "admin123", now).await?.token;

    // Header and payload are the signed portion
    let signed_len = token.rfind('.').unwrap();
    for index in (0..signed_len).filter(|i| token.as_bytes()[*i] != b'.') {
        let mut bytes = token.clone().into_bytes();
        bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
        let forged = String::from_utf8(bytes)?;

        let err = validator.validate_at(Some(&forged), now).unwrap_err();
        assert!(
            matches!(err, AuthError::MalformedOrTamperedToken { .. }),
            "altering byte {index} gave {err:?}"
        );
    }

    let forged_signature = format!("{}AAAA", &token[..token.len() - 4]);
    if forged_signature != token {
        assert!(matches!(
            validator.validate_at(Some(&forged_signature), now).unwrap_err(),
            AuthError::MalformedOrTamperedToken { .. }
        ));
    }
    Ok(())
}

#[tokio::test]
async fn test_token_from_another_secret_is_rejected() -> Result<()> {
    let (issuer, _) = common::issuer_and_validator(Duration::hours(1));
    let token = issuer.issue("admin", "admin123").await?.token;

    let other = rolegate::auth::TokenValidator::new(&rolegate::auth::SigningSecret::new(
        "a-different-deployment-secret-0123456789",
    )?);
    assert!(matches!(
        other.validate(Some(&token)).unwrap_err(),
        AuthError::MalformedOrTamperedToken { .. }
    ));
    Ok(())
}

#[tokio::test]
async fn test_admin_login_scenario() -> Result<()> {
    let (issuer, validator) = common::issuer_and_validator(Duration::hours(24));
    let issued = issuer.issue("admin", "admin123").await?;

    let claims = validator.validate(Some(&issued.token))?;
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(authorize(&claims, Role::Admin), Decision::Allow);
    assert_eq!(authorize(&claims, Role::User), Decision::Deny);
    Ok(())
}

#[tokio::test]
async fn test_user_session_expires_scenario() -> Result<()> {
    let (issuer, validator) = common::issuer_and_validator(Duration::minutes(30));
    let issued = issuer.issue_at("user", "user123", fixed_now()).await?;

    let claims = validator.validate_at(Some(&issued.token), fixed_now())?;
    assert_eq!(authorize(&claims, Role::User), Decision::Allow);
    assert_eq!(authorize(&claims, Role::Admin), Decision::Deny);

    let later = issued.expires_at() + Duration::seconds(5);
    assert!(validator
        .validate_at(Some(&issued.token), later)
        .unwrap_err()
        .is_expired());
    Ok(())
}

#[tokio::test]
async fn test_missing_token() {
    let (_, validator) = common::issuer_and_validator(Duration::minutes(30));
    assert_eq!(validator.validate(None).unwrap_err(), AuthError::MissingToken);
}

#[tokio::test]
async fn test_concurrent_issue_and_validate() -> Result<()> {
    let (issuer, validator) = common::issuer_and_validator(Duration::minutes(30));

    let mut handles = Vec::new();
    for i in 0..16 {
        let issuer = issuer.clone();
        let validator = validator.clone();
        handles.push(tokio::spawn(async move {
            let (username, password) = if i % 2 == 0 {
                ("admin", "admin123")
            } else {
                ("user", "user123")
            };
            let issued = issuer.issue(username, password).await?;
            let claims = validator.validate(Some(&issued.token))?;
            anyhow::ensure!(claims.sub == username, "wrong subject");
            Ok::<_, anyhow::Error>(claims.jti)
        }));
    }

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        ids.insert(handle.await??);
    }
    assert_eq!(ids.len(), 16);
    Ok(())
}
