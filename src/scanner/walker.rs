//! Sequential directory walker

use crate::types::{EntryKind, SyncError};
use ignore::{DirEntry, WalkBuilder};
use std::io;
use std::path::{Path, PathBuf};

/// One entry found below a walk root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Absolute (root-joined) path on disk
    pub path: PathBuf,

    /// Path relative to the walk root, used to find the counterpart
    pub relative: PathBuf,

    /// Kind as seen without following links
    pub kind: EntryKind,
}

impl TreeEntry {
    fn from_dir_entry(root: &Path, entry: DirEntry) -> Result<Self, SyncError> {
        let kind = entry
            .file_type()
            .map(EntryKind::from_file_type)
            .unwrap_or(EntryKind::Other);

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| {
                SyncError::Io(io::Error::other(format!(
                    "{} is outside walk root {}",
                    entry.path().display(),
                    root.display()
                )))
            })?
            .to_path_buf();

        Ok(Self {
            path: entry.into_path(),
            relative,
            kind,
        })
    }
}

/// Walk `root` recursively, parents before children, siblings by name.
///
/// Nothing is filtered: hidden files and anything a `.gitignore` would hide
/// are all yielded. Symbolic links are reported as links and never
/// followed. The root itself is not yielded.
///
/// Entries that cannot be read (permission denied on a directory, a path
/// removed mid-walk) come through as `Err` items and the walk carries on.
pub fn walk(root: &Path) -> impl Iterator<Item = Result<TreeEntry, SyncError>> {
    let root = root.to_path_buf();
    let walker = WalkBuilder::new(&root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    walker.filter_map(move |result| match result {
        Ok(entry) if entry.depth() == 0 => None,
        Ok(entry) => Some(TreeEntry::from_dir_entry(&root, entry)),
        Err(err) => Some(Err(SyncError::Walk(err))),
    })
}

/// Walk `root` to completion before anything acts on the tree.
///
/// Returns the entries found and the walk errors hit on the way.
pub fn snapshot(root: &Path) -> (Vec<TreeEntry>, Vec<SyncError>) {
    let mut entries = Vec::new();
    let mut errors = Vec::new();
    for result in walk(root) {
        match result {
            Ok(entry) => entries.push(entry),
            Err(err) => errors.push(err),
        }
    }
    (entries, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn relatives(root: &Path) -> Vec<PathBuf> {
        walk(root).map(|r| r.unwrap().relative).collect()
    }

    #[test]
    fn test_walk_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(relatives(temp.path()).is_empty());
    }

    #[test]
    fn test_walk_parents_before_children_sorted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("b/inner")).unwrap();
        fs::write(temp.path().join("b/inner/z.txt"), b"z").unwrap();
        fs::write(temp.path().join("a.txt"), b"a").unwrap();

        assert_eq!(
            relatives(temp.path()),
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b"),
                PathBuf::from("b/inner"),
                PathBuf::from("b/inner/z.txt"),
            ]
        );
    }

    #[test]
    fn test_walk_reports_kinds_and_absolute_paths() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("dir")).unwrap();
        fs::write(temp.path().join("file.txt"), b"x").unwrap();

        let entries: Vec<TreeEntry> = walk(temp.path()).map(|r| r.unwrap()).collect();
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[0].path, temp.path().join("dir"));
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[1].relative, PathBuf::from("file.txt"));
    }

    #[test]
    fn test_walk_does_not_apply_ignore_files_or_hide_dotfiles() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".gitignore"), b"*.log\n").unwrap();
        fs::write(temp.path().join(".hidden"), b"h").unwrap();
        fs::write(temp.path().join("build.log"), b"l").unwrap();

        let found = relatives(temp.path());
        assert!(found.contains(&PathBuf::from(".gitignore")));
        assert!(found.contains(&PathBuf::from(".hidden")));
        assert!(found.contains(&PathBuf::from("build.log")));
    }

    #[test]
    #[cfg(unix)]
    fn test_walk_does_not_follow_symlinked_directories() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), b"s").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

        let entries: Vec<TreeEntry> = walk(temp.path()).map(|r| r.unwrap()).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Symlink);
        assert_eq!(entries[0].relative, PathBuf::from("link"));
    }

    #[test]
    fn test_walk_missing_root_yields_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let (entries, errors) = snapshot(&missing);
        assert!(entries.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_not_found());
    }

    #[test]
    fn test_snapshot_collects_everything() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("x/y")).unwrap();
        fs::write(temp.path().join("x/y/f"), b"f").unwrap();

        let (entries, errors) = snapshot(temp.path());
        assert!(errors.is_empty());
        assert_eq!(entries.len(), 3);
    }
}
