//! Cache Entry Module
//!
//! Defines the per-variable cache entry and the single alias entry.

// == Cache Entry ==
/// Parsed contents of one variable file.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Candidate values, in file order
    pub values: Vec<String>,
    /// Content hash of the file when it was read
    pub hash: String,
    /// Capture timestamp (Unix milliseconds)
    pub captured_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(values: Vec<String>, hash: String, captured_at: u64) -> Self {
        Self {
            values,
            hash,
            captured_at,
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry can be reused.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale, so a
    /// zero TTL never reuses anything.
    pub fn is_fresh(&self, current_hash: &str, now_ms: u64, ttl_ms: u64) -> bool {
        self.hash == current_hash && now_ms.saturating_sub(self.captured_at) < ttl_ms
    }
}

// == Alias Entry ==
/// Formatted alias list, valid while the alias file hash is unchanged.
#[derive(Debug, Clone)]
pub struct AliasEntry {
    pub aliases: Vec<String>,
    pub hash: String,
}
