//! sharenv - shared shell environment server
//!
//! Serves a directory of variable files and an alias file as shell
//! statements for `eval $(curl -s $SHARENV_ENDPOINT)`.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod shell;
pub mod tasks;

pub use api::AppState;
pub use auth::SecretToken;
pub use config::Config;
pub use error::{Result, SharenvError};
pub use tasks::{spawn_watcher, WatchPaths};
