//! File watching for watch mode.
//!
//! [`SiteWatcher`] observes the source tree (recursively), the template
//! directory and the directory holding the page template (top level only).
//! Matching changes are debounced and handed out in batches; each batch
//! means "rebuild everything".

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Instant;

use glob::Pattern;
use mdpages_config::{PathsConfig, WatchConfig};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::debouncer::ChangeDebouncer;
use crate::error::WatchError;
use crate::scanner::PATH_MATCH_OPTIONS;

/// Decides which changed paths trigger a rebuild.
#[derive(Debug)]
struct WatchFilter {
    source_dir: PathBuf,
    source_pattern: Pattern,
    template_dir: PathBuf,
    template_pattern: Pattern,
    template: PathBuf,
}

impl WatchFilter {
    fn matches(&self, path: &Path) -> bool {
        if path == self.template {
            return true;
        }
        if let Ok(rel) = path.strip_prefix(&self.source_dir)
            && (self.source_pattern.matches_path_with(rel, PATH_MATCH_OPTIONS)
                || Self::is_source_directory(path, rel))
        {
            return true;
        }
        path.strip_prefix(&self.template_dir)
            .is_ok_and(|rel| self.template_pattern.matches_path_with(rel, PATH_MATCH_OPTIONS))
    }

    /// Whether `path` is, or was, a visible directory of the source tree.
    ///
    /// Renaming or moving a directory is reported for the directory alone,
    /// never for the pages inside it. Once gone, a directory is recognized by
    /// its missing extension.
    fn is_source_directory(path: &Path, rel: &Path) -> bool {
        let visible = rel.components().next().is_some()
            && rel.components().all(|c| match c {
                Component::Normal(name) => !name.to_string_lossy().starts_with('.'),
                _ => false,
            });
        visible && (path.is_dir() || (!path.exists() && rel.extension().is_none()))
    }
}

/// Watches site inputs and yields debounced change batches.
pub struct SiteWatcher {
    _watcher: RecommendedWatcher,
    debouncer: Arc<ChangeDebouncer>,
    wake_rx: mpsc::Receiver<()>,
}

impl SiteWatcher {
    /// Start watching the source tree, the template directory and the page
    /// template's own directory.
    ///
    /// The source directory must exist. Missing template directories are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid, the source directory cannot
    /// be resolved, or the notification backend fails to start.
    pub fn new(paths: &PathsConfig, watch: &WatchConfig) -> Result<Self, WatchError> {
        let source_dir = canonical(&paths.source_dir)?;
        let template_dir = canonical(&paths.template_dir).ok();
        let template_parent = paths
            .template
            .parent()
            .and_then(|parent| canonical(parent).ok());
        let template = match (&template_parent, paths.template.file_name()) {
            (Some(parent), Some(name)) => parent.join(name),
            _ => paths.template.clone(),
        };

        let filter = WatchFilter {
            source_dir: source_dir.clone(),
            source_pattern: Pattern::new(&watch.source_pattern)?,
            template_dir: template_dir
                .clone()
                .unwrap_or_else(|| paths.template_dir.clone()),
            template_pattern: Pattern::new(&watch.template_pattern)?,
            template,
        };

        let debouncer = Arc::new(ChangeDebouncer::new(watch.debounce()));
        let (wake_tx, wake_rx) = mpsc::channel();

        let callback_debouncer = Arc::clone(&debouncer);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "File watcher error");
                    return;
                }
            };
            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                return;
            }

            let mut recorded = false;
            for path in event.paths {
                if filter.matches(&path) {
                    tracing::debug!(path = %path.display(), kind = ?event.kind, "Change detected");
                    callback_debouncer.record(path);
                    recorded = true;
                }
            }
            if recorded {
                // Receiver only goes away together with the watcher.
                let _ = wake_tx.send(());
            }
        })?;

        watcher.watch(&source_dir, RecursiveMode::Recursive)?;
        tracing::info!(dir = %source_dir.display(), "Watching sources");

        match &template_dir {
            Some(dir) => {
                watcher.watch(dir, RecursiveMode::NonRecursive)?;
                tracing::info!(dir = %dir.display(), "Watching templates");
            }
            None => tracing::warn!(
                dir = %paths.template_dir.display(),
                "Template directory not found, not watching it"
            ),
        }

        match &template_parent {
            Some(dir) if Some(dir) == template_dir.as_ref() || dir.starts_with(&source_dir) => {}
            Some(dir) => {
                watcher.watch(dir, RecursiveMode::NonRecursive)?;
                tracing::info!(dir = %dir.display(), "Watching page template directory");
            }
            None => tracing::warn!(
                template = %paths.template.display(),
                "Page template directory not found, not watching it"
            ),
        }

        Ok(Self {
            _watcher: watcher,
            debouncer,
            wake_rx,
        })
    }

    /// Block until a batch of changes is ready, returning the changed paths.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Disconnected`] if the watcher stopped.
    pub fn next_batch(&self) -> Result<Vec<PathBuf>, WatchError> {
        loop {
            if let Some(batch) = self.wait(None)? {
                return Ok(batch);
            }
        }
    }

    /// Wait up to `timeout` for a batch. A batch already pending when the
    /// timeout expires is still waited out and returned.
    #[cfg(test)]
    fn next_batch_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<Option<Vec<PathBuf>>, WatchError> {
        self.wait(Some(Instant::now() + timeout))
    }

    fn wait(&self, until: Option<Instant>) -> Result<Option<Vec<PathBuf>>, WatchError> {
        loop {
            if let Some(batch) = self.debouncer.take_ready() {
                return Ok(Some(batch));
            }

            let pending = self.debouncer.deadline();
            let Some(wake_at) = pending.or(until) else {
                self.wake_rx.recv().map_err(|_| WatchError::Disconnected)?;
                continue;
            };

            let now = Instant::now();
            if pending.is_none() && now >= wake_at {
                return Ok(None);
            }
            match self.wake_rx.recv_timeout(wake_at.saturating_duration_since(now)) {
                Ok(()) | Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => return Err(WatchError::Disconnected),
            }
        }
    }
}

fn canonical(path: &Path) -> Result<PathBuf, WatchError> {
    fs::canonicalize(path).map_err(|source| WatchError::Io {
        path: path.to_path_buf(),
        source,
    })
}
