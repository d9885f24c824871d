//! EntryKind - Classification of a filesystem entry without following links

use std::fs::{self, FileType};
use std::io;
use std::path::Path;

/// What a directory entry is, as seen by `symlink_metadata`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,

    /// Directory (never a link to one)
    Directory,

    /// Symbolic link, whatever it points at
    Symlink,

    /// Sockets, fifos, devices
    Other,
}

impl EntryKind {
    /// Classify a file type. Symlinks win over whatever they point at.
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    /// Classify the entry at `path` without dereferencing it
    pub fn of(path: &Path) -> io::Result<Self> {
        fs::symlink_metadata(path).map(|m| Self::from_file_type(m.file_type()))
    }

    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}
