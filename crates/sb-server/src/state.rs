//! Application state.

use std::sync::Arc;

use sb_diagrams::LinkTemplates;
use sb_site::Site;

/// Shared application state.
pub(crate) struct AppState {
    /// Study material site (storage + pipeline).
    pub site: Arc<Site>,
    /// Image URL templates for diagram submissions.
    pub links: LinkTemplates,
    /// Name shown in page titles and headers.
    pub app_name: String,
    /// Client-side diagram renderer script URL.
    pub script_url: String,
    /// Application version (for ETags).
    pub version: String,
}
