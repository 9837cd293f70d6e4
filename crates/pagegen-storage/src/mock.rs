//! In-memory store implementation for testing.
//!
//! Provides [`MemoryStore`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::store::{FileStore, StoreError, StoreErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Memory";

/// In-memory store for testing.
///
/// Stores file contents in memory, keyed by relative path. Use the
/// builder methods to configure the store with test data; the `BTreeMap`
/// keeps listings sorted, matching the filesystem backend's ordering
/// guarantee.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pagegen_storage::{MemoryStore, FileStore};
///
/// let store = MemoryStore::new()
///     .with_file("layout/main.html", "{% block body %}{% endblock %}")
///     .with_file("page/index.html", "{% block body %}Home{% endblock %}");
///
/// let content = store.read(Path::new("page/index.html")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: BTreeMap<PathBuf, String>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given relative path and content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.contents.insert(path.into(), content.into());
        self
    }
}

impl FileStore for MemoryStore {
    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
        let files: Vec<PathBuf> = self
            .contents
            .keys()
            .filter_map(|p| p.strip_prefix(dir).ok())
            .map(Path::to_path_buf)
            .collect();

        if files.is_empty() {
            return Err(StoreError::not_found(dir).with_backend(BACKEND));
        }
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<String, StoreError> {
        self.contents.get(path).cloned().ok_or_else(|| {
            StoreError::new(StoreErrorKind::NotFound)
                .with_path(path)
                .with_backend(BACKEND)
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.contents.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn memory_store_is_send_sync() {
        assert_send_sync::<MemoryStore>();
    }

    #[test]
    fn read_existing() {
        let store = MemoryStore::new().with_file("page/index.html", "Home");

        let content = store.read(Path::new("page/index.html")).unwrap();

        assert_eq!(content, "Home");
    }

    #[test]
    fn read_missing() {
        let store = MemoryStore::new();

        let err = store.read(Path::new("missing.html")).unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert_eq!(err.backend, Some("Memory"));
        assert_eq!(err.path.as_deref(), Some(Path::new("missing.html")));
    }

    #[test]
    fn list_relativizes_and_sorts() {
        let store = MemoryStore::new()
            .with_file("part/z.html", "z")
            .with_file("part/a.html", "a")
            .with_file("part/nav/menu.html", "menu")
            .with_file("layout/main.html", "layout");

        let files = store.list(Path::new("part")).unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("a.html"),
                PathBuf::from("nav/menu.html"),
                PathBuf::from("z.html"),
            ]
        );
    }

    #[test]
    fn list_empty_dir_is_not_found() {
        let store = MemoryStore::new().with_file("layout/main.html", "layout");

        let err = store.list(Path::new("part")).unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::NotFound);
    }

    #[test]
    fn exists_true() {
        let store = MemoryStore::new().with_file("data.toml", "");

        assert!(store.exists(Path::new("data.toml")));
    }

    #[test]
    fn exists_false() {
        let store = MemoryStore::new();

        assert!(!store.exists(Path::new("missing.html")));
    }
}
