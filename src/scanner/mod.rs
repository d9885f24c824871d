//! Directory scanning logic

mod walker;

pub use walker::{snapshot, walk, TreeEntry};
