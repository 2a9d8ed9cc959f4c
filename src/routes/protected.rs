// ABOUTME: Authenticated resource handlers: session introspection and role-scoped home resources
// ABOUTME: Each handler runs the extract-validate step, and role resources add the authorize step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::Claims;
use crate::errors::AppError;
use crate::models::Role;
use crate::resources::ServerResources;
use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Caller's session as seen by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Username
    pub username: String,
    /// Role
    pub role: Role,
    /// Issue time (RFC 3339)
    pub issued_at: String,
    /// Expiry time (RFC 3339)
    pub expires_at: String,
}

impl From<&Claims> for SessionInfo {
    fn from(claims: &Claims) -> Self {
        Self {
            username: claims.sub.clone(),
            role: claims.role,
            issued_at: claims.issued_at().to_rfc3339(),
            expires_at: claims.expires_at().to_rfc3339(),
        }
    }
}

/// Response body for authenticated resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Always `true`
    pub success: bool,
    /// Human-readable description of the resource
    pub message: String,
    /// The caller's session
    pub user: SessionInfo,
}

impl SessionResponse {
    fn new(message: impl Into<String>, claims: &Claims) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            user: SessionInfo::from(claims),
        })
    }
}

/// Protected routes implementation
pub struct ProtectedRoutes;

impl ProtectedRoutes {
    /// Create authenticated and role-scoped routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/user", get(Self::handle_current_user))
            .route("/api/profile", get(Self::handle_profile))
            .route("/api/protected", get(Self::handle_protected))
            .route(Role::Admin.home_path(), get(Self::handle_admin_home))
            .route(Role::User.home_path(), get(Self::handle_user_home))
            .with_state(resources)
    }

    async fn handle_current_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<SessionResponse>, AppError> {
        let claims = resources.authenticator.authenticate(&headers)?;
        Ok(SessionResponse::new("Session is valid", &claims))
    }

    async fn handle_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<SessionResponse>, AppError> {
        let claims = resources.authenticator.authenticate(&headers)?;
        Ok(SessionResponse::new("Profile retrieved successfully", &claims))
    }

    async fn handle_protected(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<SessionResponse>, AppError> {
        let claims = resources.authenticator.authenticate(&headers)?;
        Ok(SessionResponse::new("This is a protected route", &claims))
    }

    async fn handle_admin_home(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<SessionResponse>, AppError> {
        let claims = resources.authenticator.authorize(&headers, Role::Admin)?;
        tracing::info!(username = %claims.sub, "admin home served");
        Ok(SessionResponse::new("Welcome to the admin home", &claims))
    }

    async fn handle_user_home(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<SessionResponse>, AppError> {
        let claims = resources.authenticator.authorize(&headers, Role::User)?;
        tracing::info!(username = %claims.sub, "user home served");
        Ok(SessionResponse::new("Welcome to the user home", &claims))
    }
}
