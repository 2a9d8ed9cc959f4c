// ABOUTME: Route module organization for rolegate HTTP endpoints
// ABOUTME: Login/logout, role-scoped resources, and health checks as separate route groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the rolegate server
//!
//! Each group exposes `routes(resources) -> Router`. Handlers compose the
//! session pipeline explicitly through
//! [`SessionAuthenticator`](crate::middleware::SessionAuthenticator).

/// Login and logout routes
pub mod auth;
/// Health check and readiness routes
pub mod health;
/// Authenticated and role-scoped resources
pub mod protected;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use protected::ProtectedRoutes;
