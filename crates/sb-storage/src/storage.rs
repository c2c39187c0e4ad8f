//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for enumerating and reading documents,
//! along with [`StorageError`] for unified error handling across backends.

use std::path::{Component, Path, PathBuf};

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Path escapes the docs root or is otherwise malformed.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the error means the requested resource is absent or unreachable.
    ///
    /// Invalid paths count as missing so callers never reveal whether a
    /// traversal target exists.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            StorageErrorKind::NotFound | StorageErrorKind::InvalidPath
        )
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Reject paths that could leave the docs root or reach hidden entries.
///
/// Empty paths, absolute paths and paths with `.` or `..` components are
/// invalid. A path through a hidden file or directory is reported as not
/// found, the same as a path that does not exist.
pub(crate) fn validate_path(path: &str, backend: &'static str) -> Result<(), StorageError> {
    let escapes = path.is_empty()
        || Path::new(path)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));

    if escapes {
        return Err(StorageError::new(StorageErrorKind::InvalidPath)
            .with_path(path)
            .with_backend(backend));
    }
    if path.split('/').any(is_hidden) {
        return Err(StorageError::not_found(path).with_backend(backend));
    }
    Ok(())
}

/// Check that `subject` names a single visible directory under the root.
pub(crate) fn validate_subject(subject: &str, backend: &'static str) -> Result<(), StorageError> {
    validate_path(subject, backend)?;
    if subject.contains('/') {
        return Err(StorageError::not_found(subject).with_backend(backend));
    }
    Ok(())
}

/// Whether a path component names a hidden entry.
pub(crate) fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Storage abstraction for document enumeration and retrieval.
///
/// Documents live under `<root>/<subject>/.../<name>`. All paths passed to and
/// returned from this trait are `/`-separated and relative to the root.
/// Hidden entries (names starting with `.`) are never listed.
pub trait Storage: Send + Sync {
    /// Subject names (top-level directories), sorted.
    ///
    /// Returns an empty list if the root does not exist.
    fn subjects(&self) -> Result<Vec<String>, StorageError>;

    /// All files under a subject, recursively, sorted.
    ///
    /// Returned paths include the subject as their first component.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageErrorKind::NotFound`] error if the subject does not
    /// exist, or [`StorageErrorKind::InvalidPath`] for a malformed subject.
    fn list(&self, subject: &str) -> Result<Vec<String>, StorageError>;

    /// Read full document text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the path is invalid, the document doesn't
    /// exist, or it can't be read as UTF-8 text.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Check if a document exists at the given path.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &str) -> bool;

    /// Get modification time as seconds since Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or mtime can't
    /// be retrieved.
    fn mtime(&self, path: &str) -> Result<f64, StorageError>;
}
