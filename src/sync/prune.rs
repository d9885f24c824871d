//! Prune phase: delete replica entries the source no longer has

use super::Synchronizer;
use crate::compare::Comparator;
use crate::executor::{remove_entry, Removal};
use crate::logging::SyncLog;
use crate::scanner::snapshot;
use crate::types::{PassStats, SyncEvent};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

impl<C: Comparator, L: SyncLog> Synchronizer<C, L> {
    /// The replica is walked to completion before anything is deleted, so
    /// removing a directory never disturbs the walk. Entries under a folder
    /// already removed in this pass are skipped without a log entry, and so
    /// are paths that vanish while being walked.
    pub(super) fn prune(&self, stats: &mut PassStats) {
        let (entries, walk_errors) = snapshot(&self.replica);
        for err in walk_errors.into_iter().filter(|e| !e.is_not_found()) {
            let event = SyncEvent::WalkFailed {
                root: self.replica.clone(),
                reason: err.to_string(),
            };
            self.record(stats, event);
        }

        let mut removed_folders: Vec<PathBuf> = Vec::new();

        for entry in entries {
            if removed_folders
                .iter()
                .any(|folder| entry.relative.starts_with(folder))
            {
                continue;
            }
            if self.source_has(&entry.relative) {
                continue;
            }

            match remove_entry(&entry.path) {
                Ok(Removal::File) => {
                    self.record(stats, SyncEvent::DeletedFile { path: entry.relative });
                }
                Ok(Removal::Folder) => {
                    removed_folders.push(entry.relative.clone());
                    self.record(stats, SyncEvent::DeletedFolder { path: entry.relative });
                }
                Ok(Removal::AlreadyGone) => {}
                Err(err) => {
                    let event = SyncEvent::DeleteFailed {
                        path: entry.relative,
                        reason: err.to_string(),
                    };
                    self.record(stats, event);
                }
            }
        }
    }

    /// Anything at the same relative path counts, whatever its kind. When the
    /// source cannot be inspected the entry is kept.
    fn source_has(&self, relative: &Path) -> bool {
        match fs::symlink_metadata(self.source.join(relative)) {
            Ok(_) => true,
            Err(e) => e.kind() != ErrorKind::NotFound,
        }
    }
}
