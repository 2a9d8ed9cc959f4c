// ABOUTME: Security utilities for session handling
// ABOUTME: Hardened cookie construction and parsing for the cookie session transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Secure cookie construction and parsing
pub mod cookies;
