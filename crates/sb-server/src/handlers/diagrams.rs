//! Diagram submission endpoint.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use sb_diagrams::DiagramLinks;
use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Request body for POST /render-mermaid.
#[derive(Deserialize)]
struct DiagramRequest {
    /// Diagram source.
    diagram: String,
}

/// Handle POST /render-mermaid.
///
/// The body is parsed as JSON regardless of `Content-Type`. A missing,
/// non-string, or unparseable `diagram` field is a bad request.
pub(crate) async fn render_mermaid(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DiagramLinks>, ServerError> {
    let request: DiagramRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected diagram submission");
        ServerError::NoDiagram
    })?;

    Ok(Json(state.links.links(&request.diagram)))
}
