//! Core type definitions for replika

mod entry;
mod error;
mod event;
mod stats;

pub use entry::EntryKind;
pub use error::SyncError;
pub use event::{LogLevel, SyncEvent};
pub use stats::PassStats;
