// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness always answers; readiness also probes the credential store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::resources::ServerResources;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(
        State(resources): State<Arc<ServerResources>>,
    ) -> (StatusCode, Json<Value>) {
        let store = resources.store.backend_name();
        match resources.store.probe().await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "store": store,
                    "transport": resources.transport.kind(),
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            ),
            Err(e) => {
                tracing::warn!(store, "readiness probe failed: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "status": "unavailable",
                        "store": store,
                        "timestamp": chrono::Utc::now().to_rfc3339()
                    })),
                )
            }
        }
    }
}
