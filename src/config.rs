//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Externally supplied secret token, if any
    pub token: Option<String>,
    /// Listen host
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
    /// Directory holding one file per variable
    pub vars_dir: PathBuf,
    /// Alias definitions file
    pub aliases_file: PathBuf,
    /// Maximum age of a cache entry in seconds
    pub cache_ttl: u64,
    /// Rotation interval in seconds. Value selection is per-request random
    /// and does not read this.
    pub rotation_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SHARENV_TOKEN` - Secret token (default: generated at startup)
    /// - `HOST` - Listen host (default: 0.0.0.0)
    /// - `PORT` - Listen port (default: 5000)
    /// - `SHARENV_VARS_DIR` - Variables directory (default: ./vars)
    /// - `SHARENV_ALIASES` - Aliases file (default: `aliases` next to the variables directory)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 1)
    /// - `ROTATION_INTERVAL` - Rotation interval in seconds (default: 60)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let vars_dir = lookup("SHARENV_VARS_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.vars_dir);
        let aliases_file = lookup("SHARENV_ALIASES")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_aliases_file(&vars_dir));

        Self {
            token: lookup("SHARENV_TOKEN").filter(|v| !v.is_empty()),
            host: lookup("HOST")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            vars_dir,
            aliases_file,
            cache_ttl: lookup("CACHE_TTL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl),
            rotation_interval: lookup("ROTATION_INTERVAL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rotation_interval),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        let vars_dir = PathBuf::from("./vars");
        Self {
            token: None,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            aliases_file: default_aliases_file(&vars_dir),
            vars_dir,
            cache_ttl: 1,
            rotation_interval: 60,
        }
    }
}

/// The aliases file lives in the parent directory of the variables directory.
fn default_aliases_file(vars_dir: &Path) -> PathBuf {
    match vars_dir.parent() {
        Some(parent) => parent.join("aliases"),
        None => PathBuf::from("aliases"),
    }
}
