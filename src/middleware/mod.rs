// ABOUTME: HTTP middleware for request tracing and session authentication
// ABOUTME: Provides the explicit extract-validate-authorize pipeline and request ID propagation

/// Session authentication pipeline
pub mod auth;
/// Request tracing and request ID layers
pub mod tracing;

// Authentication pipeline
pub use auth::SessionAuthenticator;

// Request tracing
pub use tracing::{create_request_span, request_id_layers};
