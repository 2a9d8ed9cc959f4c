// ABOUTME: Unified error handling system with standard error codes and HTTP responses
// ABOUTME: Defines AppError, ErrorCode, and the JSON failure body returned to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Centralized error codes and HTTP response formatting so every route reports
//! failures in the same shape:
//!
//! ```json
//! { "success": false, "code": "AUTH_EXPIRED", "message": "...", "expired": true }
//! ```
//!
//! The `expired` flag is present on every `401` and absent otherwise.

/// Authentication and authorization error taxonomy
pub mod auth;

pub use auth::AuthError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1000-1999)
    /// No token was presented
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    /// Credentials did not match
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,
    /// Token past its expiry
    #[serde(rename = "AUTH_EXPIRED")]
    AuthExpired = 1002,
    /// Token failed signature or structural checks
    #[serde(rename = "AUTH_MALFORMED")]
    AuthMalformed = 1003,
    /// Authenticated but not permitted
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1004,

    // Validation (3000-3999)
    /// Request body could not be used
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field was empty or absent
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Resource Management (4000-4999)
    /// A collaborator such as the credential store is unreachable
    #[serde(rename = "RESOURCE_UNAVAILABLE")]
    ResourceUnavailable = 4003,

    // Configuration (6000-6999)
    /// Invalid or missing configuration
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Anything else
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField => 400,
            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired | Self::AuthMalformed => 401,
            Self::PermissionDenied => 403,
            Self::ResourceUnavailable => 503,
            Self::ConfigError | Self::InternalError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::AuthExpired => "The authentication token has expired",
            Self::AuthMalformed => "The authentication token is malformed",
            Self::PermissionDenied => "Permission denied for this resource",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ResourceUnavailable => "A required resource is temporarily unavailable",
            Self::ConfigError => "Server configuration error",
            Self::InternalError => "An internal server error occurred",
        }
    }

    /// Whether the status is `401 Unauthorized`
    #[must_use]
    pub const fn is_unauthorized(self) -> bool {
        self.http_status() == 401
    }
}

/// Application error carried to the HTTP boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Standard error code
    pub code: ErrorCode,
    /// Client-facing message
    pub message: String,
}

impl AppError {
    /// Create a new error
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Stable error code
    pub code: ErrorCode,
    /// Client-facing message
    pub message: String,
    /// Present on `401`s: whether re-login is due to expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            success: false,
            expired: error
                .code
                .is_unauthorized()
                .then_some(error.code == ErrorCode::AuthExpired),
            code: error.code,
            message: error.message,
        }
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use super::{AppError, ErrorResponse};
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use http::StatusCode;

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status =
                StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            tracing::debug!(code = ?self.code, status = status.as_u16(), "request failed");
            (status, Json(ErrorResponse::from(self))).into_response()
        }
    }
}
