//! File comparison logic

use crate::hash::{compute_hash, HashAlgorithm};
use crate::logging::SyncLog;
use crate::types::{SyncError, SyncEvent};
use std::path::Path;

/// Decides whether two existing regular files have different contents.
///
/// Implementors only answer the question; existence checks belong to the
/// caller. The provided [`Comparator::differs`] turns any failure into
/// "different" so the caller re-copies instead of trusting a stale file.
pub trait Comparator {
    /// `Ok(true)` when contents differ
    fn compare(&self, source: &Path, replica: &Path) -> Result<bool, SyncError>;

    /// Like [`Comparator::compare`], but a failure is logged as a warning and
    /// reported as different.
    fn differs(&self, source: &Path, replica: &Path, log: &dyn SyncLog) -> bool {
        match self.compare(source, replica) {
            Ok(different) => different,
            Err(err) => {
                log.emit(&SyncEvent::CompareFailed {
                    source: source.to_path_buf(),
                    replica: replica.to_path_buf(),
                    reason: err.to_string(),
                });
                true
            }
        }
    }
}

impl<C: Comparator + ?Sized> Comparator for &C {
    fn compare(&self, source: &Path, replica: &Path) -> Result<bool, SyncError> {
        (**self).compare(source, replica)
    }
}

impl<C: Comparator + ?Sized> Comparator for Box<C> {
    fn compare(&self, source: &Path, replica: &Path) -> Result<bool, SyncError> {
        (**self).compare(source, replica)
    }
}

/// Whole-file digest comparison. Size and mtime are never consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChecksumComparator {
    algorithm: HashAlgorithm,
}

impl ChecksumComparator {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl Comparator for ChecksumComparator {
    fn compare(&self, source: &Path, replica: &Path) -> Result<bool, SyncError> {
        let source_digest = compute_hash(source, self.algorithm)?;
        let replica_digest = compute_hash(replica, self.algorithm)?;
        Ok(source_digest != replica_digest)
    }
}
