//! `mdpages build`, `mdpages pages` and `mdpages menu` implementations.

use mdpages_config::Config;
use mdpages_site::{BuildCycle, CycleReport};

use crate::error::CliError;
use crate::output::Output;

/// Which part of a build cycle to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BuildStep {
    /// Pages, then menus.
    All,
    /// Pages only; menu markers stay in place.
    Pages,
    /// Menus. The page registry only exists in memory, so pages are built
    /// first.
    Menu,
}

impl BuildStep {
    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails to build or a menu fails to inject.
    pub(crate) fn execute(self, config: &Config) -> Result<(), CliError> {
        let output = Output::new();
        let cycle = BuildCycle::new(
            config.paths_resolved.clone(),
            config.watch.source_pattern.as_str(),
        );

        output.info(&format!(
            "Source directory: {}",
            config.paths_resolved.source_dir.display()
        ));

        match self {
            Self::Pages => {
                let site = cycle.build_pages()?;
                output.success(&format!(
                    "Built {} pages into {} ({} navigation entries)",
                    site.pages.len(),
                    config.paths_resolved.output_dir.display(),
                    site.registry.len()
                ));
            }
            Self::All | Self::Menu => {
                let report = cycle.run()?;
                output.success(&cycle_summary(&report));
            }
        }

        Ok(())
    }
}

/// One-line summary of a completed cycle.
pub(crate) fn cycle_summary(report: &CycleReport) -> String {
    format!(
        "Built {} pages, injected menus into {} pages ({} ms)",
        report.pages.len(),
        report.menu_pages,
        report.elapsed.as_millis()
    )
}
