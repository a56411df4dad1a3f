//! `mdpages watch` command implementation.

use mdpages_config::Config;

use crate::commands::build::cycle_summary;
use crate::error::CliError;
use crate::output::Output;

/// Build once, then rebuild on every source or template change.
///
/// Runs until the process is terminated. A failed cycle is reported and
/// watching continues.
///
/// # Errors
///
/// Returns an error if the watcher cannot start.
pub(crate) fn execute(config: &Config) -> Result<(), CliError> {
    let output = Output::new();
    let paths = &config.paths_resolved;

    output.info(&format!("Source directory: {}", paths.source_dir.display()));
    output.info(&format!("Template: {}", paths.template.display()));
    output.info(&format!("Output directory: {}", paths.output_dir.display()));
    output.highlight(&format!(
        "Watching {} and {} (Ctrl+C to stop)",
        config.watch.source_pattern, config.watch.template_pattern
    ));

    mdpages_site::watch(paths, &config.watch, |result| match result {
        Ok(report) => output.success(&cycle_summary(report)),
        Err(err) => output.error(&format!("Build failed: {err}")),
    })?;

    Ok(())
}
