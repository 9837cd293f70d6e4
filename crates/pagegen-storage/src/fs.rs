//! Filesystem store implementation.
//!
//! Provides [`FsStore`] for reading templates and pages from a source
//! directory on the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{FileStore, StoreError, StoreErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem store rooted at a source directory.
///
/// All relative paths are resolved against the root. Listing walks
/// subdirectories recursively and returns files in sorted order so a run
/// is deterministic regardless of the platform's directory iteration
/// order.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use pagegen_storage::{FsStore, FileStore};
///
/// let store = FsStore::new(PathBuf::from("templates"));
/// let parts = store.list(Path::new("part"))?;
/// ```
#[derive(Debug)]
pub struct FsStore {
    /// Root directory all relative paths resolve against.
    root: PathBuf,
}

impl FsStore {
    /// Create a new filesystem store rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a path doesn't escape the store root.
    ///
    /// Rejects paths containing parent directory components (`..`) to
    /// prevent path traversal (e.g. `../../../etc/passwd`).
    fn validate_path(path: &Path) -> Result<(), StoreError> {
        let has_parent_dir = path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));

        if has_parent_dir {
            return Err(StoreError::new(StoreErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Walk a directory recursively, collecting regular files.
    fn walk(dir: &Path, rel_base: &Path, files: &mut Vec<PathBuf>) -> Result<(), StoreError> {
        let entries = fs::read_dir(dir).map_err(|e| {
            StoreError::io(e, Some(dir.to_path_buf())).with_backend(BACKEND)
        })?;

        // Collect entries with cached file_type to avoid repeated stat
        // calls in sort.
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e, is_dir)
            })
            .collect();

        entries.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));

        for (entry, is_dir) in entries {
            let rel_path = rel_base.join(entry.file_name());
            if is_dir {
                Self::walk(&entry.path(), &rel_path, files)?;
            } else {
                files.push(rel_path);
            }
        }

        Ok(())
    }
}

impl FileStore for FsStore {
    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
        Self::validate_path(dir)?;

        let full_dir = self.root.join(dir);
        let mut files = Vec::new();
        Self::walk(&full_dir, Path::new(""), &mut files)?;
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<String, StoreError> {
        Self::validate_path(path)?;

        let full_path = self.root.join(path);
        fs::read_to_string(&full_path)
            .map_err(|e| StoreError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        if Self::validate_path(path).is_err() {
            return false;
        }
        self.root.join(path).is_file()
    }
}
