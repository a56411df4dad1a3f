//! mdpages CLI - Markdown pages with generated navigation.
//!
//! Provides commands for:
//! - `build` (default): render pages, then inject navigation menus
//! - `pages`: render pages only
//! - `menu`: inject navigation menus (renders pages first)
//! - `watch`: rebuild whenever sources or the template change

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildStep, SiteArgs};
use output::Output;

/// mdpages - Markdown pages with generated navigation.
#[derive(Parser)]
#[command(name = "mdpages", version, about)]
struct Cli {
    #[command(flatten)]
    site: SiteArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Render all pages, then inject navigation menus (default).
    Build,
    /// Render all pages without injecting menus.
    Pages,
    /// Inject navigation menus into all pages.
    Menu,
    /// Build, then rebuild on every change.
    Watch,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.site.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = cli.site.load_config().and_then(|config| {
        match cli.command.unwrap_or(Commands::Build) {
            Commands::Build => BuildStep::All.execute(&config),
            Commands::Pages => BuildStep::Pages.execute(&config),
            Commands::Menu => BuildStep::Menu.execute(&config),
            Commands::Watch => commands::watch::execute(&config),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_build() {
        let cli = Cli::try_parse_from(["mdpages"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_subcommands_parse() {
        for (arg, expected) in [
            ("build", Commands::Build),
            ("pages", Commands::Pages),
            ("menu", Commands::Menu),
            ("watch", Commands::Watch),
        ] {
            let cli = Cli::try_parse_from(["mdpages", arg]).unwrap();
            assert_eq!(cli.command, Some(expected));
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mdpages",
            "watch",
            "--source-dir",
            "docs",
            "--output-dir",
            "public",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::Watch));
        assert!(cli.site.verbose);
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["mdpages", "deploy"]).is_err());
    }
}
