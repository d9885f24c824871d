//! PassStats - Tallies for one synchronization pass

use super::SyncEvent;
use indicatif::{HumanBytes, HumanDuration};
use std::time::Duration;

/// Counters collected while a pass runs.
///
/// A pass never fails as a whole; these counters and the log stream are the
/// only record of what happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Files created or overwritten in the replica
    pub files_copied: usize,

    /// Bytes written by those copies
    pub bytes_copied: u64,

    /// Source directories visited (created in the replica if missing)
    pub dirs_ensured: usize,

    /// Files whose replica copy was already identical
    pub files_unchanged: usize,

    /// Source symlinks skipped
    pub symlinks_skipped: usize,

    /// Source sockets, fifos and devices skipped
    pub unsupported_skipped: usize,

    /// Stale replica files removed
    pub files_deleted: usize,

    /// Stale replica directories removed
    pub folders_deleted: usize,

    /// Entries that failed (copy, create, delete or walk)
    pub errors: usize,

    pub elapsed: Duration,
}

impl PassStats {
    /// Count an event. Comparison failures are warnings about a file that is
    /// then copied, so they are not tallied on their own.
    pub fn record(&mut self, event: &SyncEvent) {
        match event {
            SyncEvent::Copied { .. } => self.files_copied += 1,
            SyncEvent::DeletedFile { .. } => self.files_deleted += 1,
            SyncEvent::DeletedFolder { .. } => self.folders_deleted += 1,
            SyncEvent::SkippedSymlink { .. } => self.symlinks_skipped += 1,
            SyncEvent::SkippedUnsupported { .. } => self.unsupported_skipped += 1,
            SyncEvent::CompareFailed { .. } => {}
            SyncEvent::EntryFailed { .. }
            | SyncEvent::DeleteFailed { .. }
            | SyncEvent::WalkFailed { .. } => self.errors += 1,
        }
    }

    /// Number of replica mutations made by the pass
    pub fn changes(&self) -> usize {
        self.files_copied + self.files_deleted + self.folders_deleted
    }

    /// True when the pass touched nothing and hit no errors
    pub fn is_clean(&self) -> bool {
        self.changes() == 0 && self.errors == 0
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "copied {} ({}), unchanged {}, deleted {} file(s) and {} folder(s), skipped {} symlink(s), {} error(s) in {}",
            self.files_copied,
            HumanBytes(self.bytes_copied),
            self.files_unchanged,
            self.files_deleted,
            self.folders_deleted,
            self.symlinks_skipped,
            self.errors,
            HumanDuration(self.elapsed)
        )
    }
}
