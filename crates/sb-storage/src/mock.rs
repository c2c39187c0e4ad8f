//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};

use crate::storage::{
    Storage, StorageError, StorageErrorKind, is_hidden, validate_path, validate_subject,
};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory file.
#[derive(Debug)]
struct MockFile {
    content: String,
    mtime: f64,
}

/// Mock storage for testing.
///
/// Stores documents in memory. Use the builder methods to configure the mock
/// with test data. Subjects are derived from the first component of each file
/// path, plus any added explicitly with [`with_subject`](Self::with_subject).
///
/// # Example
///
/// ```ignore
/// use sb_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("biology/cells.md", "# Cells\n\nContent.")
///     .with_subject("chemistry");
///
/// assert_eq!(storage.subjects().unwrap(), vec!["biology", "chemistry"]);
/// let content = storage.read("biology/cells.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: BTreeMap<String, MockFile>,
    subjects: BTreeSet<String>,
    unreadable: BTreeSet<String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content and a zero modification time.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        if let Some((subject, _)) = path.split_once('/') {
            self.subjects.insert(subject.to_owned());
        }
        self.files.insert(
            path,
            MockFile {
                content: content.into(),
                mtime: 0.0,
            },
        );
        self
    }

    /// Set modification time for an existing file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `mtime` - Modification time as seconds since Unix epoch
    #[must_use]
    pub fn with_mtime(mut self, path: &str, mtime: f64) -> Self {
        if let Some(file) = self.files.get_mut(path) {
            file.mtime = mtime;
        }
        self
    }

    /// Add an empty subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.insert(subject.into());
        self
    }

    /// Make reads of an existing file fail with a non-not-found error.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        self.unreadable.insert(path.into());
        self
    }

    fn file(&self, path: &str) -> Result<&MockFile, StorageError> {
        validate_path(path, BACKEND)?;
        self.files
            .get(path)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}

impl Storage for MockStorage {
    fn subjects(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .subjects
            .iter()
            .filter(|s| !is_hidden(s))
            .cloned()
            .collect())
    }

    fn list(&self, subject: &str) -> Result<Vec<String>, StorageError> {
        validate_subject(subject, BACKEND)?;
        if !self.subjects.contains(subject) {
            return Err(StorageError::not_found(subject).with_backend(BACKEND));
        }

        let prefix = format!("{subject}/");
        Ok(self
            .files
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .filter(|path| !path.split('/').any(is_hidden))
            .cloned()
            .collect())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        let file = self.file(path)?;
        if self.unreadable.contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(file.content.clone())
    }

    fn exists(&self, path: &str) -> bool {
        self.file(path).is_ok()
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        self.file(path).map(|f| f.mtime)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn storage() -> MockStorage {
        MockStorage::new()
            .with_file("biology/intro.md", "# Intro")
            .with_file("biology/cells/mitosis.md", "# Mitosis")
            .with_file("biology/.hidden/x.md", "hidden")
            .with_file("history/rome.md", "# Rome")
            .with_subject("chemistry")
            .with_mtime("biology/intro.md", 1_700_000_000.0)
    }

    #[test]
    fn test_subjects() {
        assert_eq!(
            storage().subjects().unwrap(),
            vec!["biology", "chemistry", "history"]
        );
    }

    #[test]
    fn test_list_subject() {
        assert_eq!(
            storage().list("biology").unwrap(),
            vec!["biology/cells/mitosis.md", "biology/intro.md"]
        );
    }

    #[test]
    fn test_list_empty_subject() {
        assert!(storage().list("chemistry").unwrap().is_empty());
    }

    #[test]
    fn test_list_missing_subject() {
        let err = storage().list("physics").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_read_and_mtime() {
        let storage = storage();

        assert_eq!(storage.read("history/rome.md").unwrap(), "# Rome");
        assert!((storage.mtime("biology/intro.md").unwrap() - 1_700_000_000.0).abs() < f64::EPSILON);
        assert!(storage.exists("history/rome.md"));
        assert!(!storage.exists("history/carthage.md"));
    }

    #[test]
    fn test_read_rejects_path_traversal() {
        let err = storage().read("biology/../history/rome.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_hidden_entries_are_not_found() {
        let storage = storage().with_subject(".trash");

        assert_eq!(
            storage.read("biology/.hidden/x.md").unwrap_err().kind,
            StorageErrorKind::NotFound
        );
        assert_eq!(storage.list(".trash").unwrap_err().kind, StorageErrorKind::NotFound);
        assert_eq!(storage.list("biology/cells").unwrap_err().kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_unreadable_file() {
        let storage = storage().with_unreadable("history/rome.md");

        let err = storage.read("history/rome.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert!(!err.is_not_found());
    }
}
