// ABOUTME: Router assembly and HTTP server lifecycle
// ABOUTME: Mounts route groups with tracing, request ID, and CORS layers; shuts down on signal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::environment::ServerConfig;
use crate::middleware::tracing::{create_request_span, request_id_layers};
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, HealthRoutes, ProtectedRoutes};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::Router;
use http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Configure CORS from `CORS_ORIGINS`
///
/// A wildcard allows any origin but never credentials, so cookie sessions are
/// only usable cross-origin from explicitly listed origins.
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter(|o| o.as_str() != "*")
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        base.allow_origin(AllowOrigin::any())
    } else {
        base.allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}

/// Assemble every route group with the shared middleware stack
#[must_use]
pub fn router(resources: &Arc<ServerResources>) -> Router {
    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(ProtectedRoutes::routes(Arc::clone(resources)))
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id)
                .layer(TraceLayer::new_for_http().make_span_with(create_request_span::<Body>))
                .layer(propagate_request_id)
                .layer(setup_cors(&resources.config)),
        )
}

/// Bind `port` and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>, port: u16) -> Result<()> {
    let app = router(&resources);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP port {port}"))?;
    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
