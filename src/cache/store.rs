//! Variable Store Module
//!
//! Caches parsed variable files and the formatted alias list. Entries are
//! reused only while the file hash is unchanged and the entry is younger
//! than the TTL. Read failures make a variable absent, never an error.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::source::{content_hash, parse_lines, DiskSource, FileSource};
use crate::cache::{AliasEntry, CacheEntry, CacheStats};
use crate::shell::{format_aliases, is_shell_identifier};

// == Invalidation ==
/// A change notification for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    /// Drop the entry for one variable
    Variable(String),
    /// Drop the alias list
    Aliases,
}

// == Var Store ==
/// Cache over the variables directory and the aliases file.
pub struct VarStore {
    vars_dir: PathBuf,
    aliases_file: PathBuf,
    ttl_ms: u64,
    /// Parsed variable files keyed by variable name
    entries: HashMap<String, CacheEntry>,
    aliases: Option<AliasEntry>,
    stats: CacheStats,
    source: Arc<dyn FileSource>,
    clock: Arc<dyn Clock>,
}

impl VarStore {
    // == Constructor ==
    /// Creates a store backed by the local disk and the system clock.
    pub fn new(
        vars_dir: impl Into<PathBuf>,
        aliases_file: impl Into<PathBuf>,
        ttl: Duration,
    ) -> Self {
        Self::with_parts(
            vars_dir,
            aliases_file,
            ttl,
            Arc::new(DiskSource),
            Arc::new(SystemClock),
        )
    }

    /// Creates a store with explicit file source and clock.
    pub fn with_parts(
        vars_dir: impl Into<PathBuf>,
        aliases_file: impl Into<PathBuf>,
        ttl: Duration,
        source: Arc<dyn FileSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vars_dir: vars_dir.into(),
            aliases_file: aliases_file.into(),
            ttl_ms: ttl.as_millis() as u64,
            entries: HashMap::new(),
            aliases: None,
            stats: CacheStats::new(),
            source,
            clock,
        }
    }

    pub fn vars_dir(&self) -> &Path {
        &self.vars_dir
    }

    pub fn aliases_file(&self) -> &Path {
        &self.aliases_file
    }

    // == Variable Names ==
    /// Lists exportable variable names, sorted.
    ///
    /// Hidden files and names that are not shell identifiers are skipped. A
    /// missing directory is created and yields no names.
    pub fn var_names(&self) -> Vec<String> {
        if !self.source.exists(&self.vars_dir) {
            if let Err(e) = self.source.create_dir_all(&self.vars_dir) {
                warn!("Could not create variables directory: {}", e);
            }
            return Vec::new();
        }

        let mut names = match self.source.list_files(&self.vars_dir) {
            Ok(names) => names,
            Err(e) => {
                warn!("Could not list variables directory: {}", e);
                return Vec::new();
            }
        };

        names.retain(|name| {
            if name.starts_with('.') {
                return false;
            }
            if !is_shell_identifier(name) {
                warn!("Skipping {:?}: not a valid shell variable name", name);
                return false;
            }
            true
        });
        names.sort();
        names
    }

    // == Candidates ==
    /// Returns the candidate values for `name`, or None if the variable is
    /// absent, empty or unreadable.
    pub fn candidates(&mut self, name: &str) -> Option<Vec<String>> {
        let path = self.vars_dir.join(name);

        let bytes = match self.source.read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.is_not_found() {
                    debug!("Variable {} no longer exists", name);
                } else {
                    warn!("Error reading {}: {}", path.display(), e);
                }
                self.forget(name);
                return None;
            }
        };

        let hash = content_hash(&bytes);
        let now = self.clock.now_ms();

        if let Some(entry) = self.entries.get(name) {
            if entry.is_fresh(&hash, now, self.ttl_ms) {
                self.stats.record_hit();
                return Some(entry.values.clone());
            }
        }

        self.stats.record_miss();
        let values = match parse_lines(&path, &bytes) {
            Ok(values) if !values.is_empty() => values,
            Ok(_) => {
                self.forget(name);
                return None;
            }
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                self.forget(name);
                return None;
            }
        };

        debug!("Refreshed {} ({} values)", name, values.len());
        self.entries
            .insert(name.to_string(), CacheEntry::new(values.clone(), hash, now));
        self.stats.set_total_entries(self.entries.len());
        Some(values)
    }

    // == Resolve All ==
    /// Candidates for every variable in the directory, keyed by name.
    ///
    /// Entries for files that are no longer listed are dropped, so the cache
    /// never outlives the directory contents even without change events.
    pub fn resolve_all(&mut self) -> BTreeMap<String, Vec<String>> {
        let mut resolved = BTreeMap::new();
        for name in self.var_names() {
            if let Some(values) = self.candidates(&name) {
                resolved.insert(name, values);
            }
        }
        self.entries.retain(|name, _| resolved.contains_key(name));
        self.stats.set_total_entries(self.entries.len());
        resolved
    }

    // == Aliases ==
    /// Formatted alias statements, reparsed only when the file hash changes.
    pub fn aliases(&mut self) -> Vec<String> {
        let bytes = match self.source.read(&self.aliases_file) {
            Ok(bytes) => bytes,
            Err(e) => {
                if !e.is_not_found() {
                    warn!("Error reading {}: {}", self.aliases_file.display(), e);
                }
                self.aliases = None;
                return Vec::new();
            }
        };

        let hash = content_hash(&bytes);
        if let Some(entry) = &self.aliases {
            if entry.hash == hash {
                return entry.aliases.clone();
            }
        }

        let lines = match parse_lines(&self.aliases_file, &bytes) {
            Ok(lines) => lines,
            Err(e) => {
                warn!("Error reading {}: {}", self.aliases_file.display(), e);
                self.aliases = None;
                return Vec::new();
            }
        };

        let aliases = format_aliases(lines.iter().map(String::as_str));
        debug!("Refreshed aliases ({} entries)", aliases.len());
        self.aliases = Some(AliasEntry {
            aliases: aliases.clone(),
            hash,
        });
        aliases
    }

    // == Invalidate ==
    /// Drops the cached entry for `name`.
    pub fn invalidate(&mut self, name: &str) {
        if self.forget(name) {
            self.stats.record_invalidation();
            debug!("Invalidated {}", name);
        }
    }

    /// Drops the cached alias list.
    pub fn invalidate_aliases(&mut self) {
        if self.aliases.take().is_some() {
            self.stats.record_invalidation();
            debug!("Invalidated aliases");
        }
    }

    pub fn apply(&mut self, invalidation: Invalidation) {
        match invalidation {
            Invalidation::Variable(name) => self.invalidate(&name),
            Invalidation::Aliases => self.invalidate_aliases(),
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats;
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns true if `name` currently has a cached entry.
    pub fn is_cached(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn forget(&mut self, name: &str) -> bool {
        let removed = self.entries.remove(name).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }
}

impl std::fmt::Debug for VarStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VarStore")
            .field("vars_dir", &self.vars_dir)
            .field("aliases_file", &self.aliases_file)
            .field("ttl_ms", &self.ttl_ms)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
