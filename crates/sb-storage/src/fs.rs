//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading documents from a docs root on the local
//! filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::storage::{Storage, StorageError, is_hidden, validate_path, validate_subject};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Subjects are the visible directories directly under the root. Listing a
/// subject walks it recursively, skipping hidden files and directories.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use sb_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let text = storage.read("biology/cells.md")?;
/// # Ok::<(), sb_storage::StorageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Resolve a validated relative path against the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_path(path, BACKEND)?;
        Ok(self.source_dir.join(path))
    }

    /// Walk a directory recursively, collecting file paths under `prefix`.
    fn walk(dir: &Path, prefix: &str, files: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            tracing::debug!(dir = %dir.display(), "Skipping unreadable directory");
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_hidden(&name) {
                continue;
            }

            let child = format!("{prefix}/{name}");
            match entry.file_type() {
                Ok(t) if t.is_dir() => Self::walk(&entry.path(), &child, files),
                Ok(t) if t.is_file() => files.push(child),
                // Follow symlinks to files, but never into directories
                Ok(_) if entry.path().is_file() => files.push(child),
                _ => {}
            }
        }
    }
}

impl Storage for FsStorage {
    fn subjects(&self) -> Result<Vec<String>, StorageError> {
        if !self.source_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.source_dir).map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;

        let mut subjects: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| !is_hidden(name))
            .collect();
        subjects.sort();
        Ok(subjects)
    }

    fn list(&self, subject: &str) -> Result<Vec<String>, StorageError> {
        validate_subject(subject, BACKEND)?;
        let dir = self.source_dir.join(subject);
        if !dir.is_dir() {
            return Err(StorageError::not_found(subject).with_backend(BACKEND));
        }

        let mut files = Vec::new();
        Self::walk(&dir, subject, &mut files);
        files.sort();
        Ok(files)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        let full_path = self.resolve(path)?;
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        let full_path = self.resolve(path)?;
        let metadata = fs::metadata(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))?;
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StorageErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    /// Docs root with two subjects, a hidden directory and a stray root file.
    fn create_docs() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("biology/cells")).unwrap();
        fs::create_dir_all(root.join("chemistry")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join(".private")).unwrap();
        fs::write(root.join(".private/secret.md"), "# Secret").unwrap();
        fs::write(root.join("README.md"), "# Root").unwrap();
        fs::write(root.join("biology/intro.md"), "# Intro").unwrap();
        fs::write(root.join("biology/cells/mitosis.md"), "# Mitosis").unwrap();
        fs::write(root.join("biology/cells/diagram.png"), [0u8; 4]).unwrap();
        fs::write(root.join("biology/.draft.md"), "# Draft").unwrap();
        temp_dir
    }

    #[test]
    fn test_subjects_sorted_and_visible_only() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.subjects().unwrap(), vec!["biology", "chemistry"]);
    }

    #[test]
    fn test_subjects_missing_root() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent/docs"));

        assert!(storage.subjects().unwrap().is_empty());
    }

    #[test]
    fn test_list_recursive_sorted() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let files = storage.list("biology").unwrap();

        assert_eq!(
            files,
            vec![
                "biology/cells/diagram.png",
                "biology/cells/mitosis.md",
                "biology/intro.md",
            ]
        );
    }

    #[test]
    fn test_list_empty_subject() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.list("chemistry").unwrap().is_empty());
    }

    #[test]
    fn test_list_missing_subject() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.list("physics").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_list_file_is_not_a_subject() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.list("README.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_list_rejects_path_traversal() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().join("biology"));

        let err = storage.list("..").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_list_hidden_or_nested_subject() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        for subject in [".private", ".git", "biology/cells"] {
            let err = storage.list(subject).unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::NotFound, "subject: {subject:?}");
        }
    }

    #[test]
    fn test_list_current_dir_is_not_a_subject() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.list(".").unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_read_hidden_files() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        for path in [".private/secret.md", "biology/.draft.md"] {
            let err = storage.read(path).unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::NotFound, "path: {path:?}");
            assert!(!storage.exists(path));
        }
    }

    #[test]
    fn test_read_nested_file() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.read("biology/cells/mitosis.md").unwrap(), "# Mitosis");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.read("biology/missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_read_rejects_path_traversal() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().join("biology"));

        let err = storage.read("../README.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_read_rejects_absolute_path() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let absolute = temp_dir.path().join("README.md");

        let err = storage.read(&absolute.to_string_lossy()).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_exists() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.exists("biology/intro.md"));
        assert!(!storage.exists("biology/missing.md"));
        assert!(!storage.exists("biology"));
        assert!(!storage.exists("../etc/passwd"));
    }

    #[test]
    fn test_mtime_returns_modification_time() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let mtime = storage.mtime("biology/intro.md").unwrap();

        assert!(mtime > 0.0);
    }

    #[test]
    fn test_mtime_missing_file() {
        let temp_dir = create_docs();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.mtime("biology/missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }
}
