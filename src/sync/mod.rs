//! One-way synchronization engine
//!
//! A [`Synchronizer`] mirrors a source tree onto a replica tree in one pass:
//!
//! 1. **Propagate**: walk the source, create missing directories, copy files
//!    that are missing in the replica or whose contents differ.
//! 2. **Prune**: walk the replica, delete everything that has no counterpart
//!    at the same relative path in the source.
//!
//! A pass is best effort. A failure on one entry is logged and the walk
//! moves on; nothing short of a panic stops a pass early.

mod propagate;
mod prune;

use crate::compare::Comparator;
use crate::logging::SyncLog;
use crate::types::{PassStats, SyncEvent};
use std::path::PathBuf;
use std::time::Instant;

/// Mirrors `source` onto `replica`.
///
/// Holds no state between passes: every [`Synchronizer::run`] re-walks both
/// trees from scratch. Roots must already be validated (existing, distinct,
/// not nested); the synchronizer does not check them again.
pub struct Synchronizer<C, L> {
    source: PathBuf,
    replica: PathBuf,
    comparator: C,
    log: L,
}

impl<C: Comparator, L: SyncLog> Synchronizer<C, L> {
    pub fn new(
        source: impl Into<PathBuf>,
        replica: impl Into<PathBuf>,
        comparator: C,
        log: L,
    ) -> Self {
        Self {
            source: source.into(),
            replica: replica.into(),
            comparator,
            log,
        }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Run one full pass: propagate, then prune.
    ///
    /// Never fails. Per-entry problems show up as error events in the log
    /// and in [`PassStats::errors`].
    pub fn run(&self) -> PassStats {
        let started = Instant::now();
        let mut stats = PassStats::default();

        self.propagate(&mut stats);
        self.prune(&mut stats);

        stats.elapsed = started.elapsed();
        stats
    }

    fn record(&self, stats: &mut PassStats, event: SyncEvent) {
        stats.record(&event);
        self.log.emit(&event);
    }
}
