//! Log handles passed into the synchronizer
//!
//! The core never looks a logger up globally. It is handed a [`SyncLog`]
//! at construction and reports every copy, delete, skip and failure
//! through it, in order.

mod subscriber;

pub use subscriber::{init, LogSettings};

use crate::types::{LogLevel, SyncEvent};
use std::sync::{Arc, Mutex, PoisonError};

/// Leveled message sink used by the sync core
pub trait SyncLog {
    /// Record one message. Messages must be kept in call order.
    fn log(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Record a sync event at its own level
    fn emit(&self, event: &SyncEvent) {
        self.log(event.level(), &event.to_string());
    }
}

impl<T: SyncLog + ?Sized> SyncLog for &T {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }

    fn emit(&self, event: &SyncEvent) {
        (**self).emit(event);
    }
}

impl<T: SyncLog + ?Sized> SyncLog for Arc<T> {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }

    fn emit(&self, event: &SyncEvent) {
        (**self).emit(event);
    }
}

/// Forwards messages to `tracing`; where they end up is decided by
/// [`init`] (log file plus optional console).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl SyncLog for TracingLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "replika", "{message}"),
            LogLevel::Warning => tracing::warn!(target: "replika", "{message}"),
            LogLevel::Error => tracing::error!(target: "replika", "{message}"),
        }
    }
}

/// One recorded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps every message in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Messages only, in order
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    /// Messages logged at `level`
    pub fn at_level(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Number of messages containing `needle`
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lock()
            .iter()
            .filter(|r| r.message.contains(needle))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SyncLog for MemoryLog {
    fn log(&self, level: LogLevel, message: &str) {
        self.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }
}
