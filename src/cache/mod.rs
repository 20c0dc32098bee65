//! Cache Module
//!
//! Hash- and TTL-validated cache over the variables directory and alias file.

pub mod clock;
mod entry;
pub mod source;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;

use tokio::sync::Mutex;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{AliasEntry, CacheEntry};
pub use source::{DiskSource, FileSource};
pub use stats::CacheStats;
pub use store::{Invalidation, VarStore};

/// Store shared between request handlers and the watcher task.
pub type SharedStore = Arc<Mutex<VarStore>>;
