//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `max_content_length` - Request body limit in bytes
pub(crate) fn create_router(state: Arc<AppState>, max_content_length: usize) -> Router {
    let security_headers = ServiceBuilder::new()
        .layer(security::csp_layer(&state.script_url))
        .layer(security::content_type_options_layer())
        .layer(security::frame_options_layer());

    Router::new()
        .route("/", get(handlers::subjects::index))
        .route("/subject/{subject}", get(handlers::subjects::subject))
        .route("/view/{*path}", get(handlers::pages::view_document))
        .route("/render-mermaid", post(handlers::diagrams::render_mermaid))
        .fallback(handlers::pages::not_found)
        .layer(DefaultBodyLimit::max(max_content_length))
        .layer(security_headers)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
