// ABOUTME: Signed-token session authentication: issuance, validation, and signing secrets
// ABOUTME: Mints HS256 tokens for verified credentials and checks signature and expiry on use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication and Session Tokens
//!
//! A session is never stored server-side. It is derived on every request from
//! a token whose claims are trusted only when both hold:
//!
//! - the signature verifies under the server's signing secret, and
//! - the current time is strictly before the token's expiry.
//!
//! [`TokenIssuer`] turns verified credentials into such a token and
//! [`TokenValidator`] recovers the claims from one. Both are cheap to clone and
//! hold only immutable state, so they are shared freely across request tasks.

/// Token claims and issued-token envelope
pub mod claims;

/// Credential verification and token minting
pub mod issuer;

/// Signing secret handling
pub mod secret;

/// Signature and expiry verification
pub mod validator;

pub use claims::{Claims, IssuedToken};
pub use issuer::TokenIssuer;
pub use secret::SigningSecret;
pub use validator::TokenValidator;
