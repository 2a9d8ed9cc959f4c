// ABOUTME: Application-wide constants for token claims, cookies, and session lifetimes
// ABOUTME: Single source of truth for values shared by the issuer, validator, and transports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identity used in token claims and log output
pub mod service_names {
    /// Issuer claim (`iss`) placed in every token
    pub const ROLEGATE_SERVER: &str = "rolegate-server";
    /// Audience claim (`aud`) tokens are minted for
    pub const SESSION_API: &str = "rolegate-session";
}

/// Session lifetime defaults, in seconds
pub mod session {
    /// Cookie sessions live for one day
    pub const COOKIE_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;
    /// Bearer sessions live for thirty minutes
    pub const BEARER_TOKEN_TTL_SECS: u64 = 30 * 60;
    /// Upper bound on a configured lifetime (ten years)
    pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;
}

/// Cookie and header names
pub mod http_names {
    /// Default name of the `HttpOnly` session cookie
    pub const AUTH_COOKIE: &str = "auth_token";
    /// Scheme prefix of the `Authorization` header
    pub const BEARER_PREFIX: &str = "Bearer ";
    /// Request correlation header
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// Signing-secret constraints
pub mod secrets {
    /// Secrets shorter than this are accepted with a warning
    pub const MIN_SECRET_LENGTH: usize = 32;
    /// Length of generated development secrets
    pub const GENERATED_SECRET_LENGTH: usize = 64;
}
