//! Document view page.
//!
//! Renders a document through the diagram-preserving pipeline and serves it
//! with conditional request support.

use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::state::AppState;
use crate::templates;

/// Handle GET /view/{*path}.
pub(crate) async fn view_document(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let document = state.site.render(&path)?;
    let page = templates::document_page(&state.app_name, &document, &state.script_url);

    let etag = compute_etag(&state.version, &page);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let modified = Duration::try_from_secs_f64(document.modified).unwrap_or_default();
    let last_modified: DateTime<Utc> = (UNIX_EPOCH + modified).into();

    Ok((
        [
            (header::ETAG, etag),
            (
                header::LAST_MODIFIED,
                last_modified
                    .format("%a, %d %b %Y %H:%M:%S GMT")
                    .to_string(),
            ),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Html(page),
    )
        .into_response())
}

/// Fallback for unknown routes.
pub(crate) async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_owned())
}

/// Compute `ETag` from version and page content.
///
/// MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
