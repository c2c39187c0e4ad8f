//! Diagram constants shared by extraction and reinjection.

/// Fence language tag that marks a diagram block (case-sensitive).
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

/// Class carried by every diagram container.
///
/// The client-side renderer discovers diagrams by selecting on this class.
pub const CONTAINER_CLASS: &str = "mermaid";

/// Marker tag used when the source does not already contain it.
pub(crate) const DEFAULT_MARKER_TAG: &str = "MERMAID_DIAGRAM";

/// Placeholder substituted by the encoded diagram in link templates.
pub(crate) const DIAGRAM_PLACEHOLDER: &str = "{diagram}";

/// Default SVG link template (mermaid.ink).
pub(crate) const DEFAULT_SVG_URL: &str = "https://mermaid.ink/svg/{diagram}";

/// Default PNG link template (mermaid.ink).
pub(crate) const DEFAULT_PNG_URL: &str = "https://mermaid.ink/img/{diagram}";
