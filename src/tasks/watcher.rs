//! File Watcher Task
//!
//! Turns file-system notifications into cache invalidations so an edited
//! variable is re-read on the next request.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::cache::{Invalidation, SharedStore};
use crate::error::{Result, SharenvError};

/// Canonical locations the watcher compares event paths against.
#[derive(Debug, Clone)]
pub struct WatchPaths {
    vars_dir: PathBuf,
    aliases_file: PathBuf,
}

impl WatchPaths {
    /// Canonicalizes both locations. The variables directory must exist; the
    /// aliases file only needs an existing parent directory.
    pub fn resolve(vars_dir: &Path, aliases_file: &Path) -> Result<Self> {
        let vars_dir = vars_dir
            .canonicalize()
            .map_err(|e| SharenvError::io(vars_dir, e))?;

        let parent = match aliases_file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let parent = parent
            .canonicalize()
            .map_err(|e| SharenvError::io(parent, e))?;
        let aliases_file = match aliases_file.file_name() {
            Some(name) => parent.join(name),
            None => parent,
        };

        Ok(Self {
            vars_dir,
            aliases_file,
        })
    }

    pub fn vars_dir(&self) -> &Path {
        &self.vars_dir
    }

    /// Directory holding the aliases file.
    pub fn aliases_dir(&self) -> &Path {
        self.aliases_file.parent().unwrap_or(&self.aliases_file)
    }

    /// Maps a changed path to the cache entry it affects.
    pub fn invalidation_for(&self, path: &Path) -> Option<Invalidation> {
        if path == self.aliases_file {
            return Some(Invalidation::Aliases);
        }
        if path.parent() == Some(self.vars_dir.as_path()) {
            let name = path.file_name()?.to_str()?;
            return Some(Invalidation::Variable(name.to_string()));
        }
        None
    }

    /// Invalidations for a notify event. Access events are ignored.
    pub fn invalidations(&self, event: &Event) -> Vec<Invalidation> {
        match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => event
                .paths
                .iter()
                .filter_map(|path| self.invalidation_for(path))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Starts watching the variables directory and the aliases file's directory.
///
/// The returned watcher must be kept alive for notifications to flow; the
/// task can be aborted during shutdown.
///
/// # Example
/// ```ignore
/// let paths = WatchPaths::resolve(&config.vars_dir, &config.aliases_file)?;
/// let (_watcher, handle) = spawn_watcher(state.store.clone(), paths)?;
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_watcher(
    store: SharedStore,
    paths: WatchPaths,
) -> Result<(RecommendedWatcher, JoinHandle<()>)> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Invalidation>();

    let event_paths = paths.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            for invalidation in event_paths.invalidations(&event) {
                // Receiver gone means the task was aborted during shutdown.
                let _ = tx.send(invalidation);
            }
        }
        Err(e) => error!("File watcher error: {}", e),
    })?;

    watcher.watch(paths.vars_dir(), RecursiveMode::NonRecursive)?;
    if paths.aliases_dir() != paths.vars_dir() {
        watcher.watch(paths.aliases_dir(), RecursiveMode::NonRecursive)?;
    }

    info!(
        "Watching {} and {} for changes",
        paths.vars_dir().display(),
        paths.aliases_dir().display()
    );

    let handle = tokio::spawn(async move {
        while let Some(invalidation) = rx.recv().await {
            debug!("Change detected: {:?}", invalidation);
            store.lock().await.apply(invalidation);
        }
        info!("File watcher task terminated");
    });

    Ok((watcher, handle))
}
