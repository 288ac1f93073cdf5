use std::path::PathBuf;
use thiserror::Error;

/// Typed errors for mutating operations.
///
/// Scanning absorbs read failures (an unreadable directory contributes
/// nothing), but deletes and cleans must report exactly what went wrong:
/// the user should never believe a removal happened when it did not.
#[derive(Debug, Error)]
pub enum CleanerError {
    /// Target vanished before a clean-in-place could measure it.
    /// Deletes treat a missing path as success instead.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Guarded location the engine refuses to touch.
    #[error("refusing to remove '{path}': {hint}")]
    OperationNotAllowed { path: PathBuf, hint: String },

    /// Permission-restricted path. On macOS this usually means Full Disk
    /// Access has not been granted to the terminal.
    #[error("access denied: {path}")]
    AccessDenied { path: PathBuf },

    /// Unexpected read/write failure.
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CleanerError {
    /// Wrap an io::Error, promoting common kinds to their typed variants.
    pub fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => CleanerError::PathNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => CleanerError::AccessDenied {
                path: path.to_path_buf(),
            },
            _ => CleanerError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanerError>;
