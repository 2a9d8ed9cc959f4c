// ABOUTME: Core types for the rolegate session authentication workspace
// ABOUTME: Foundation crate with roles, credential records, error handling, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Rolegate Core
//!
//! Foundation crate providing shared types for the rolegate authentication
//! server. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the `AuthError` taxonomy
//! - **constants**: Token audience, issuer, cookie names, and default lifetimes
//! - **models**: `Role`, `CredentialRecord`, and the on-disk `CredentialSource` format

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (roles and credential records)
pub mod models;
