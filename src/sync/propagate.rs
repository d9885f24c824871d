//! Propagate phase: make the replica hold everything the source holds

use super::Synchronizer;
use crate::compare::Comparator;
use crate::executor::{copy_file_atomic, remove_entry, Removal};
use crate::logging::SyncLog;
use crate::scanner::{walk, TreeEntry};
use crate::types::{EntryKind, PassStats, SyncError, SyncEvent};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

impl<C: Comparator, L: SyncLog> Synchronizer<C, L> {
    pub(super) fn propagate(&self, stats: &mut PassStats) {
        for result in walk(&self.source) {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    let event = SyncEvent::WalkFailed {
                        root: self.source.clone(),
                        reason: err.to_string(),
                    };
                    self.record(stats, event);
                    continue;
                }
            };

            if let Err(err) = self.propagate_entry(&entry, stats) {
                let event = SyncEvent::EntryFailed {
                    path: entry.relative.clone(),
                    reason: err.to_string(),
                };
                self.record(stats, event);
            }
        }
    }

    fn propagate_entry(&self, entry: &TreeEntry, stats: &mut PassStats) -> Result<(), SyncError> {
        let target = self.replica.join(&entry.relative);

        match entry.kind {
            EntryKind::Symlink => {
                let event = SyncEvent::SkippedSymlink {
                    path: entry.relative.clone(),
                };
                self.record(stats, event);
            }
            EntryKind::Other => {
                let event = SyncEvent::SkippedUnsupported {
                    path: entry.relative.clone(),
                };
                self.record(stats, event);
            }
            EntryKind::Directory => {
                if !self.claim_target(entry, &target, stats)? {
                    fs::create_dir_all(&target)?;
                }
                stats.dirs_ensured += 1;
            }
            EntryKind::File => {
                let present = self.claim_target(entry, &target, stats)?;
                if !present || self.comparator.differs(&entry.path, &target, &self.log) {
                    stats.bytes_copied += copy_file_atomic(&entry.path, &target)?;
                    let event = SyncEvent::Copied {
                        path: entry.relative.clone(),
                    };
                    self.record(stats, event);
                } else {
                    stats.files_unchanged += 1;
                }
            }
        }

        Ok(())
    }

    /// Make sure nothing of the wrong kind occupies `target`.
    ///
    /// A link, or an entry whose kind differs from the source entry, is
    /// removed and logged as a deletion. Returns true when a matching entry
    /// is already in place. Links are never followed.
    fn claim_target(
        &self,
        entry: &TreeEntry,
        target: &Path,
        stats: &mut PassStats,
    ) -> Result<bool, SyncError> {
        let existing = match EntryKind::of(target) {
            Ok(kind) => kind,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(SyncError::Io(e)),
        };
        if existing == entry.kind {
            return Ok(true);
        }

        let path = entry.relative.clone();
        match remove_entry(target)? {
            Removal::File => self.record(stats, SyncEvent::DeletedFile { path }),
            Removal::Folder => self.record(stats, SyncEvent::DeletedFolder { path }),
            Removal::AlreadyGone => {}
        }
        Ok(false)
    }
}
