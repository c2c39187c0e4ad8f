//! Subject listing and document view assembly.

use std::path::Path;
use std::sync::Arc;

use sb_renderer::{ConvertError, Converter};
use sb_storage::{Storage, StorageError};

use crate::document::{Document, RenderedDocument};
use crate::pipeline::render_markdown;

/// Site configuration.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Recognized document extension, without the leading dot.
    pub extension: String,
    /// Largest document, in bytes, that is loaded for rendering.
    pub max_document_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            extension: "md".to_owned(),
            max_document_size: 16 * 1024 * 1024,
        }
    }
}

/// Error returned when listing subjects or documents fails.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Subject directory does not exist.
    #[error("Subject not found: {0}")]
    SubjectNotFound(String),
    /// Storage failure while listing.
    #[error("Storage error: {0}")]
    Storage(#[source] StorageError),
}

/// Error returned when document rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Document is missing, escapes the root, or lacks the document extension.
    #[error("Document not found: {0}")]
    NotFound(String),
    /// Document exists but could not be read.
    #[error("Failed to read document: {0}")]
    Read(#[source] StorageError),
    /// Converter failure.
    #[error("Failed to convert document: {0}")]
    Convert(#[from] ConvertError),
}

impl RenderError {
    /// Whether the error maps to a "not found" response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    fn from_storage(err: StorageError, path: &str) -> Self {
        if err.is_not_found() {
            Self::NotFound(path.to_owned())
        } else {
            Self::Read(err)
        }
    }
}

/// Study material site.
///
/// Holds no per-request state; share it behind [`Arc`] between handlers.
pub struct Site {
    storage: Arc<dyn Storage>,
    converter: Arc<dyn Converter>,
    config: SiteConfig,
}

impl Site {
    /// Create a site over a storage backend and a converter.
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        converter: Arc<dyn Converter>,
        config: SiteConfig,
    ) -> Self {
        Self {
            storage,
            converter,
            config,
        }
    }

    /// Recognized document extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.config.extension
    }

    /// Subject names, sorted.
    pub fn subjects(&self) -> Result<Vec<String>, SiteError> {
        self.storage.subjects().map_err(SiteError::Storage)
    }

    /// Document paths under a subject, sorted.
    ///
    /// Only files with the recognized extension are returned. Paths are
    /// relative to the docs root and include the subject.
    pub fn documents(&self, subject: &str) -> Result<Vec<String>, SiteError> {
        let files = self.storage.list(subject).map_err(|e| {
            if e.is_not_found() {
                SiteError::SubjectNotFound(subject.to_owned())
            } else {
                SiteError::Storage(e)
            }
        })?;

        Ok(files
            .into_iter()
            .filter(|path| self.is_document(path))
            .collect())
    }

    /// Whether a path carries the recognized document extension.
    #[must_use]
    pub fn is_document(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .is_some_and(|ext| ext == self.config.extension.as_str())
    }

    /// Read a document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] if the path lacks the document
    /// extension, escapes the root, or does not exist, and
    /// [`RenderError::Read`] for other storage failures. Text over
    /// `max_document_size` is rejected with [`ConvertError::InputTooLarge`].
    pub fn load(&self, path: &str) -> Result<Document, RenderError> {
        if !self.is_document(path) {
            return Err(RenderError::NotFound(path.to_owned()));
        }

        let text = self
            .storage
            .read(path)
            .map_err(|e| RenderError::from_storage(e, path))?;
        if text.len() > self.config.max_document_size {
            return Err(ConvertError::InputTooLarge {
                size: text.len(),
                limit: self.config.max_document_size,
            }
            .into());
        }
        let modified = self
            .storage
            .mtime(path)
            .map_err(|e| RenderError::from_storage(e, path))?;

        Ok(Document::new(path, text, modified))
    }

    /// Render a document view.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load); conversion failures become
    /// [`RenderError::Convert`].
    pub fn render(&self, path: &str) -> Result<RenderedDocument, RenderError> {
        let document = self.load(path)?;
        let output = render_markdown(&document.text, self.converter.as_ref())?;

        tracing::debug!(
            path = %document.path,
            diagrams = output.diagram_count,
            recovered = output.recovered,
            "Rendered document"
        );

        Ok(RenderedDocument {
            title: document.title(),
            subject: document.subject,
            path: document.path,
            html: output.html,
            diagram_count: output.diagram_count,
            recovered: output.recovered,
            warnings: output.warnings,
            modified: document.modified,
        })
    }
}
