//! Rendering pipeline error types.

use std::path::PathBuf;

use pagegen_storage::StoreError;

/// Error returned by template assembly, page rendering, or the builder.
///
/// Every variant carries the offending file path and wraps the underlying
/// cause, so a failure report can name both the stage and the file.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Layout file does not exist.
    #[error("layout template not found: {}: {source}", path.display())]
    TemplateNotFound {
        /// Path of the layout file.
        path: PathBuf,
        /// Underlying store error.
        source: StoreError,
    },
    /// Layout file exists but access is denied.
    #[error("layout template unreadable: {}: {source}", path.display())]
    TemplatePermission {
        /// Path of the layout file.
        path: PathBuf,
        /// Underlying store error.
        source: StoreError,
    },
    /// Layout file has a template syntax error.
    #[error("layout template invalid: {}: {source}", path.display())]
    TemplateParse {
        /// Path of the layout file.
        path: PathBuf,
        /// Underlying template engine error.
        source: minijinja::Error,
    },
    /// Part directory walk failed or a part did not parse.
    #[error("failed to load parts: {}: {source}", path.display())]
    PartsLoad {
        /// Path of the part file or directory.
        path: PathBuf,
        /// Underlying cause.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Page discovery walk failed.
    #[error("failed to walk page directory: {}: {source}", path.display())]
    Walk {
        /// Path of the page directory.
        path: PathBuf,
        /// Underlying store error.
        source: StoreError,
    },
    /// Page content file does not exist.
    #[error("page not found: {}: {source}", path.display())]
    PageNotFound {
        /// Path of the page file.
        path: PathBuf,
        /// Underlying store error.
        source: StoreError,
    },
    /// Page content file exists but access is denied.
    #[error("page unreadable: {}: {source}", path.display())]
    PagePermission {
        /// Path of the page file.
        path: PathBuf,
        /// Underlying store error.
        source: StoreError,
    },
    /// Reading a source file failed for a reason other than absence or
    /// permission (an invalid path, say).
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying store error.
        source: StoreError,
    },
    /// Page content has a template syntax error.
    #[error("page template invalid: {}: {source}", path.display())]
    PageParse {
        /// Path of the page file.
        path: PathBuf,
        /// Underlying template engine error.
        source: minijinja::Error,
    },
    /// Template execution referenced a field absent from the data context.
    #[error("missing data key while rendering {}: {source}", path.display())]
    MissingKey {
        /// Path of the page file being rendered.
        path: PathBuf,
        /// Underlying template engine error naming the field.
        source: minijinja::Error,
    },
    /// Any other template execution failure.
    #[error("render failed for {}: {source}", path.display())]
    Execution {
        /// Path of the page file being rendered.
        path: PathBuf,
        /// Underlying template engine error.
        source: minijinja::Error,
    },
    /// Writing rendered output failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
