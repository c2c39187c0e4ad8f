//! Subject index and subject listing pages.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;

use crate::error::ServerError;
use crate::state::AppState;
use crate::templates;

/// Handle GET /.
pub(crate) async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let subjects = state.site.subjects()?;
    Ok(Html(templates::index_page(&state.app_name, &subjects)))
}

/// Handle GET /subject/{subject}.
pub(crate) async fn subject(
    Path(subject): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let documents = state.site.documents(&subject)?;
    Ok(Html(templates::subject_page(
        &state.app_name,
        &subject,
        &documents,
    )))
}
