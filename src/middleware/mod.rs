// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request-scoped spans keyed by request ID and the CORS layer built from config

/// CORS configuration
pub mod cors;
/// Request tracing
pub mod tracing;

pub use cors::setup_cors;
pub use tracing::{http_trace_layer, RequestSpan};
