//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod watch;

use std::path::PathBuf;

use clap::Args;
use mdpages_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use build::BuildStep;

/// Options shared by every command.
#[derive(Args, Debug)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover mdpages.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(long, global = true)]
    source_dir: Option<PathBuf>,

    /// Page template file (overrides config).
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Output directory for generated pages (overrides config).
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output (per-cycle timing and page logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration with command-line overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            template: self.template.clone(),
            output_dir: self.output_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");
        Ok(config)
    }
}
