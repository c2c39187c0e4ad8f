//! Document storage abstraction for Study Buddy.
//!
//! This crate provides a [`Storage`] trait for enumerating subjects and
//! documents and reading document text, independent of where documents live.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `subjects()`, `list()`, `read()`, `exists()` and `mtime()`
//! - [`FsStorage`] implementation walking a docs root on the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Path Convention
//!
//! Paths are `/`-separated and relative to the docs root. The first component
//! is the subject: `"biology/cells.md"` lives in subject `"biology"`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use sb_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for subject in storage.subjects()? {
//!     for path in storage.list(&subject)? {
//!         println!("{path}");
//!     }
//! }
//! # Ok::<(), sb_storage::StorageError>(())
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
