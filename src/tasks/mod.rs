//! Background Tasks Module
//!
//! # Tasks
//! - File watcher: invalidates cache entries when served files change

mod watcher;

pub use watcher::{spawn_watcher, WatchPaths};
