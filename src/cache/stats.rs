//! Cache Statistics Module
//!
//! Counters logged by the export handler after each render.

/// Hit, miss and invalidation counts of a [`VarStore`](super::VarStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads answered from a fresh cache entry
    pub hits: u64,
    /// Reads that had to parse the file
    pub misses: u64,
    /// Entries dropped because of a change notification
    pub invalidations: u64,
    /// Number of variables currently cached
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of reads served without parsing; 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            reads => self.hits as f64 / reads as f64,
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    pub(crate) fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
