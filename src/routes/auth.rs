// ABOUTME: Login and logout route handlers
// ABOUTME: Login verifies credentials and attaches a token via the active transport; logout ends it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AuthError};
use crate::logging::AppLogger;
use crate::models::Role;
use crate::resources::ServerResources;
use crate::transport::TransportKind;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Login request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Username; missing is treated as empty
    #[serde(default)]
    pub username: String,
    /// Password; missing is treated as empty
    #[serde(default)]
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always `true`
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Authenticated username
    pub username: String,
    /// Role granted to the session
    pub role: Role,
    /// Where the client should navigate next
    pub redirect: String,
    /// Token expiry (RFC 3339)
    pub expires_at: String,
    /// Active transport
    pub transport: TransportKind,
    /// The token itself; only for the bearer transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Logout response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Always `true`
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Whether the server ended the session itself
    pub server_cleared: bool,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create login and logout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/login", post(Self::handle_login))
            .route("/api/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle user login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<impl IntoResponse, AppError> {
        let Json(request) = body.map_err(|rejection| {
            tracing::debug!("rejected login body: {rejection}");
            AppError::invalid_input(format!("Invalid login request: {}", rejection.body_text()))
        })?;

        let issued = match resources
            .issuer
            .issue(&request.username, &request.password)
            .await
        {
            Ok(issued) => issued,
            Err(e) => {
                AppLogger::log_auth_event(&request.username, "login", false, Some(&e.to_string()));
                if matches!(e, AuthError::StoreUnavailable { .. }) {
                    tracing::error!("login failed on credential store: {e}");
                }
                return Err(e.into());
            }
        };

        let transport = &resources.transport;
        let mut headers = HeaderMap::new();
        transport.attach(&mut headers, &issued);

        AppLogger::log_auth_event(&issued.claims.sub, "login", true, None);

        let role = issued.role();
        let response = LoginResponse {
            success: true,
            message: "Login successful".to_owned(),
            username: issued.claims.sub.clone(),
            role,
            redirect: role.home_path().to_owned(),
            expires_at: issued.expires_at().to_rfc3339(),
            transport: transport.kind(),
            token: transport.token_in_body().then(|| issued.token.clone()),
        };

        Ok((StatusCode::OK, headers, Json(response)))
    }

    /// Handle logout; never requires a valid session
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
    ) -> impl IntoResponse {
        let mut headers = HeaderMap::new();
        let effect = resources.transport.clear(&mut headers);

        let message = if effect.server_cleared() {
            "Logged out successfully"
        } else {
            "Logged out. Discard the token on the client; it remains valid until it expires."
        };
        tracing::info!(
            transport = %resources.transport.kind(),
            server_cleared = effect.server_cleared(),
            "logout"
        );

        (
            StatusCode::OK,
            headers,
            Json(LogoutResponse {
                success: true,
                message: message.to_owned(),
                server_cleared: effect.server_cleared(),
            }),
        )
    }
}
