//! Executor module for replica mutations

pub mod copy;

pub use copy::copy_file_atomic;

use crate::types::{EntryKind, SyncError};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

/// What [`remove_entry`] actually removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// A file, link or special file
    File,

    /// A directory and everything below it
    Folder,

    /// Nothing was there any more
    AlreadyGone,
}

/// Remove whatever sits at `path` without following links.
///
/// Directories are removed recursively; files, links and special files are
/// unlinked. A path that has disappeared, before or during the removal, is
/// reported as [`Removal::AlreadyGone`] rather than an error.
pub fn remove_entry(path: &Path) -> Result<Removal, SyncError> {
    let kind = match EntryKind::of(path) {
        Ok(kind) => kind,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Removal::AlreadyGone),
        Err(e) => return Err(SyncError::Io(e)),
    };

    let result: io::Result<Removal> = if kind.is_dir() {
        fs::remove_dir_all(path).map(|_| Removal::Folder)
    } else {
        fs::remove_file(path).map(|_| Removal::File)
    };

    match result {
        Ok(removal) => Ok(removal),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Removal::AlreadyGone),
        Err(e) => Err(SyncError::Io(e)),
    }
}
