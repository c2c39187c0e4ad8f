//! Document and rendered document types.

use std::path::Path;

/// Raw document read from storage.
///
/// Created per request and dropped once rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Top-level directory the document belongs to.
    pub subject: String,
    /// Path relative to the docs root, including the subject.
    pub path: String,
    /// Raw document text.
    pub text: String,
    /// Modification time as seconds since Unix epoch.
    pub modified: f64,
}

impl Document {
    /// Create a document, deriving the subject from the path.
    #[must_use]
    pub fn new(path: impl Into<String>, text: impl Into<String>, modified: f64) -> Self {
        let path = path.into();
        Self {
            subject: subject_of(&path).to_owned(),
            path,
            text: text.into(),
            modified,
        }
    }

    /// Display title: the file name without its extension.
    #[must_use]
    pub fn title(&self) -> String {
        title_of(&self.path)
    }
}

/// Fully rendered document view.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Top-level directory the document belongs to.
    pub subject: String,
    /// Path relative to the docs root.
    pub path: String,
    /// Display title (file stem).
    pub title: String,
    /// Final HTML fragment with diagram containers.
    pub html: String,
    /// Number of diagrams extracted from the source.
    pub diagram_count: usize,
    /// Number of diagram code blocks repaired by the fallback sweep.
    pub recovered: usize,
    /// Non-fatal problems found while rendering.
    pub warnings: Vec<String>,
    /// Source modification time as seconds since Unix epoch.
    pub modified: f64,
}

/// First path component.
pub(crate) fn subject_of(path: &str) -> &str {
    path.split('/').next().unwrap_or_default()
}

/// File stem of the last path component.
pub(crate) fn title_of(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
