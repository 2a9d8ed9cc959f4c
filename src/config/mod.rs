// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Loads and validates environment-driven configuration for the session server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the rolegate server
//!
//! All settings come from environment variables; there is no config file.
//! See [`environment::ServerConfig::from_env`] for the recognised variables.

/// Environment and server configuration
pub mod environment;

pub use environment::{AuthConfig, Environment, ServerConfig};
