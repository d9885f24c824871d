//! Error types for replika

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for replika operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration (missing or unparsable values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (logic checks on otherwise well-formed values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A file could not be read while computing its digest
    #[error("Failed to hash {path}: {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be copied into the replica
    #[error("Failed to copy to {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal error
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Log sink could not be set up
    #[error("Logging error: {0}")]
    Logging(String),
}

impl SyncError {
    /// Check if this error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, SyncError::Validation(_) | SyncError::Config(_))
    }

    /// Check if the underlying cause is a path that no longer exists
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(ErrorKind::NotFound)
    }

    fn io_kind(&self) -> Option<ErrorKind> {
        match self {
            SyncError::Io(e) => Some(e.kind()),
            SyncError::Hash { source, .. } | SyncError::Copy { source, .. } => Some(source.kind()),
            SyncError::Walk(e) => e.io_error().map(|io| io.kind()),
            _ => None,
        }
    }
}
