//! # replika - one-way directory mirroring
//!
//! Keeps a replica directory identical to a source directory by running a
//! fixed number of synchronization passes. Each pass copies new or changed
//! files into the replica and deletes anything the source no longer has.
//! Every change is logged to a file and, optionally, the console.

// Module declarations
pub mod config;
pub mod scanner;
pub mod compare;
pub mod executor;
pub mod hash;
pub mod logging;
pub mod sync;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use compare::{ChecksumComparator, Comparator};
pub use config::Config;
pub use hash::HashAlgorithm;
pub use logging::{MemoryLog, SyncLog, TracingLog};
pub use sync::Synchronizer;
pub use types::{EntryKind, LogLevel, PassStats, SyncError, SyncEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
