//! SyncEvent - Everything a sync pass reports to its log

use std::fmt;
use std::path::PathBuf;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Event emitted by the synchronizer or comparator.
///
/// Paths are relative to their root, except for `CompareFailed` (the two
/// files being compared) and `WalkFailed` (the root being walked).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// File created or overwritten in the replica
    Copied { path: PathBuf },

    /// Stale file (or link) removed from the replica
    DeletedFile { path: PathBuf },

    /// Stale directory removed from the replica, subtree included
    DeletedFolder { path: PathBuf },

    /// Symbolic link found in the source and left alone
    SkippedSymlink { path: PathBuf },

    /// Socket, fifo or device found in the source and left alone
    SkippedUnsupported { path: PathBuf },

    /// Checksum comparison failed; the file is treated as different
    CompareFailed {
        source: PathBuf,
        replica: PathBuf,
        reason: String,
    },

    /// Creating or copying one source entry failed
    EntryFailed { path: PathBuf, reason: String },

    /// Deleting one replica entry failed
    DeleteFailed { path: PathBuf, reason: String },

    /// The tree walker could not read part of a tree
    WalkFailed { root: PathBuf, reason: String },
}

impl SyncEvent {
    pub fn level(&self) -> LogLevel {
        match self {
            SyncEvent::Copied { .. }
            | SyncEvent::DeletedFile { .. }
            | SyncEvent::DeletedFolder { .. } => LogLevel::Info,
            SyncEvent::SkippedSymlink { .. }
            | SyncEvent::SkippedUnsupported { .. }
            | SyncEvent::CompareFailed { .. } => LogLevel::Warning,
            SyncEvent::EntryFailed { .. }
            | SyncEvent::DeleteFailed { .. }
            | SyncEvent::WalkFailed { .. } => LogLevel::Error,
        }
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEvent::Copied { path } => write!(f, "Copied/Updated: {}", path.display()),
            SyncEvent::DeletedFile { path } => write!(f, "Deleted file: {}", path.display()),
            SyncEvent::DeletedFolder { path } => write!(f, "Deleted folder: {}", path.display()),
            SyncEvent::SkippedSymlink { path } => {
                write!(f, "Skipped symlink: {}", path.display())
            }
            SyncEvent::SkippedUnsupported { path } => {
                write!(f, "Skipped unsupported file type: {}", path.display())
            }
            SyncEvent::CompareFailed {
                source,
                replica,
                reason,
            } => write!(
                f,
                "Failed to compare files: {} and {} due to error: {}",
                source.display(),
                replica.display(),
                reason
            ),
            SyncEvent::EntryFailed { path, reason } => {
                write!(f, "Error processing {}: {}", path.display(), reason)
            }
            SyncEvent::DeleteFailed { path, reason } => {
                write!(f, "Error deleting {}: {}", path.display(), reason)
            }
            SyncEvent::WalkFailed { root, reason } => {
                write!(f, "Error walking {}: {}", root.display(), reason)
            }
        }
    }
}
