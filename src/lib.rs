// ABOUTME: Main library entry point for the rolegate session authentication server
// ABOUTME: Credential verification, signed-token sessions, cookie/bearer transport, and role gating
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Rolegate
//!
//! Session authentication for small web services: a user proves who they are
//! once with a username and password, receives a signed, time-bounded token,
//! and presents that token on every later request. Each protected resource
//! declares exactly one role and admits only sessions carrying it.
//!
//! ## Request pipeline
//!
//! ```text
//! login:     credentials -> CredentialStore -> TokenIssuer -> SessionTransport::attach
//! request:   SessionTransport::extract -> TokenValidator -> authorize(claims, role)
//! ```
//!
//! The pipeline is composed explicitly by route handlers through
//! [`middleware::SessionAuthenticator`]; nothing is threaded implicitly through
//! request extensions.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rolegate::config::environment::ServerConfig;
//! use rolegate::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Token issuance and validation
pub mod auth;

/// Role-gated authorization decisions
pub mod authorization;

/// Configuration management from the environment
pub mod config;

/// Application constants (re-exported from `rolegate-core`)
pub mod constants;

/// Unified error handling system (re-exported from `rolegate-core`)
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware: session authentication pipeline and request tracing
pub mod middleware;

/// Core data models (re-exported from `rolegate-core`)
pub mod models;

/// Salted password hashing
pub mod password;

/// Shared server context handed to every route
pub mod resources;

/// `HTTP` routes for login, logout, and role-scoped resources
pub mod routes;

/// Cookie utilities
pub mod security;

/// Router assembly and server lifecycle
pub mod server;

/// Credential store backends
pub mod store;

/// Session transport strategies (cookie or bearer)
pub mod transport;
