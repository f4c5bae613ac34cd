//! Error types for file operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while mutating the filesystem.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Target already exists.
    #[error("Already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// No space left on the destination device.
    #[error("No space left on device: {path}")]
    StorageFull { path: PathBuf },

    /// Destination is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A directory cannot be copied or moved into itself.
    #[error("Cannot copy or move {path} into itself")]
    IntoItself { path: PathBuf },

    /// Source and destination resolve to the same path.
    #[error("Source and destination are the same: {path}")]
    SamePath { path: PathBuf },

    /// Rejected user-supplied name.
    #[error("Invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The parent row is not a real entry.
    #[error("The parent entry cannot be used here")]
    ParentEntry,

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking worker panicked or was cancelled.
    #[error("Background task failed: {message}")]
    Task { message: String },
}

impl OpsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            std::io::ErrorKind::StorageFull => Self::StorageFull { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<tokio::task::JoinError> for OpsError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ops_error_io_kinds() {
        let err = OpsError::io(
            "/dst/a.txt",
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists"),
        );
        assert!(matches!(err, OpsError::AlreadyExists { .. }));

        let err = OpsError::io(
            "/dst",
            std::io::Error::new(std::io::ErrorKind::StorageFull, "full"),
        );
        assert_eq!(err.to_string(), "No space left on device: /dst");
    }

    #[test]
    fn test_invalid_name_message() {
        let err = OpsError::invalid_name("a/b", "Name cannot contain '/'");
        assert!(err.to_string().contains("a/b"));
        assert!(err.to_string().contains("cannot contain"));
    }
}
