// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates or propagates request IDs and creates a span for every HTTP request

use crate::constants::http_names;
use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::Span;

/// Header carrying the request correlation id
#[must_use]
pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(http_names::REQUEST_ID_HEADER)
}

/// Layers that assign a request id when absent and echo it on the response
#[must_use]
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::new(request_id_header(), MakeRequestUuid),
        PropagateRequestIdLayer::new(request_id_header()),
    )
}

/// Create a tracing span for HTTP requests
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(http_names::REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        status_code = tracing::field::Empty,
    )
}
