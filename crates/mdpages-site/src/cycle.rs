//! Build cycles: page building followed by menu injection.

use std::time::{Duration, Instant};

use mdpages_config::{PathsConfig, WatchConfig};

use crate::builder::{BuiltSite, PageBuilder};
use crate::error::{BuildError, WatchError};
use crate::menu::MenuInjector;
use crate::registry::PageRegistry;
use crate::watcher::SiteWatcher;

/// Summary of a completed build cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Output paths of the rendered pages, in processing order.
    pub pages: Vec<String>,
    /// Registry the menus were built from.
    pub registry: PageRegistry,
    /// Number of HTML pages menus were injected into.
    pub menu_pages: usize,
    /// Wall time of the cycle.
    pub elapsed: Duration,
}

/// One full rebuild of the site.
///
/// The template is reloaded on every run so template edits take effect in
/// watch mode.
#[derive(Debug, Clone)]
pub struct BuildCycle {
    paths: PathsConfig,
    source_pattern: String,
}

impl BuildCycle {
    /// Create a cycle building the sources that match `source_pattern`.
    #[must_use]
    pub fn new(paths: PathsConfig, source_pattern: impl Into<String>) -> Self {
        Self {
            paths,
            source_pattern: source_pattern.into(),
        }
    }

    /// Run the page building stage only.
    ///
    /// # Errors
    ///
    /// Returns the first error hit while building pages.
    pub fn build_pages(&self) -> Result<BuiltSite, BuildError> {
        PageBuilder::new(&self.paths, &self.source_pattern)?.build()
    }

    /// Run page building, then menu injection with the resulting registry.
    ///
    /// # Errors
    ///
    /// Returns the first error from either stage. Files written before the
    /// failure stay on disk.
    pub fn run(&self) -> Result<CycleReport, BuildError> {
        let started = Instant::now();

        let site = self.build_pages()?;
        let menu_pages = MenuInjector::new(&self.paths.output_dir).inject(&site.registry)?;

        let report = CycleReport {
            pages: site.pages,
            registry: site.registry,
            menu_pages,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            pages = report.pages.len(),
            menu_pages,
            elapsed_ms = report.elapsed.as_millis(),
            "Build cycle complete"
        );
        Ok(report)
    }
}

/// Build once, then rebuild on every change until the watcher fails.
///
/// `on_cycle` receives the outcome of every cycle. A failed cycle does not
/// stop watching. Cycles run on the calling thread, one at a time; changes
/// made during a cycle trigger the next one.
///
/// # Errors
///
/// Returns an error only if the watcher cannot start or stops.
pub fn watch<F>(paths: &PathsConfig, watch: &WatchConfig, mut on_cycle: F) -> Result<(), WatchError>
where
    F: FnMut(&Result<CycleReport, BuildError>),
{
    let watcher = SiteWatcher::new(paths, watch)?;
    let cycle = BuildCycle::new(paths.clone(), watch.source_pattern.as_str());

    let mut run_cycle = || {
        let result = cycle.run();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Build cycle failed");
        }
        on_cycle(&result);
    };

    run_cycle();
    loop {
        let changes = watcher.next_batch()?;
        tracing::info!(changes = changes.len(), "Rebuilding after changes");
        run_cycle();
    }
}
