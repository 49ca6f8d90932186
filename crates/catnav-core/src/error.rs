//! Error types for `catnav-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. Faults raised by a
//! [`CatalogService`](crate::catalog::CatalogService) implementation use the
//! narrower [`CatalogError`](crate::catalog::CatalogError) and are mapped
//! into a `CoreError` by the navigator.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A listing or search call to the catalog service failed.
    #[error("catalog service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A search was submitted with an empty or whitespace-only query.
    #[error("empty search query")]
    EmptyQuery,

    /// Resolving the absolute path of a folder found via search failed.
    #[error("failed to resolve catalog path: {0}")]
    ResolveFailure(String),

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A catalog data file is malformed.
    #[error("catalog format error: {0}")]
    CatalogFormat(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `catnav-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Reads a file to a string, mapping the common I/O failures onto
/// [`CoreError::NotFound`] and [`CoreError::PermissionDenied`].
pub(crate) fn read_to_string(path: &std::path::Path) -> CoreResult<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
        _ => CoreError::Io(e),
    })
}
