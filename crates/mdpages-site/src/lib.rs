//! Site building for mdpages.
//!
//! A build cycle has two stages:
//!
//! 1. [`PageBuilder`] renders every Markdown source into a page wrapped in
//!    the shared [`PageTemplate`] and returns the [`PageRegistry`]
//! 2. [`MenuInjector`] replaces `<!-- MENU -->` markers in every output page
//!    with links to all registry entries
//!
//! [`BuildCycle`] runs both in order; [`watch`] reruns it whenever a source
//! or template changes.
//!
//! # Example
//!
//! ```ignore
//! use mdpages_config::Config;
//! use mdpages_site::BuildCycle;
//!
//! let config = Config::load(None, None)?;
//! let report = BuildCycle::new(config.paths_resolved.clone()).run()?;
//! for entry in &report.registry {
//!     println!("{} -> {}", entry.label, entry.path);
//! }
//! ```

mod builder;
mod cycle;
mod debouncer;
mod error;
mod menu;
mod registry;
mod scanner;
mod template;
mod watcher;

pub use builder::{BuiltSite, PageBuilder};
pub use cycle::{BuildCycle, CycleReport, watch};
pub use error::{BuildError, WatchError};
pub use menu::{MenuInjector, inject_menu, render_menu};
pub use registry::{HOME_LABEL, HOME_PATH, PageEntry, PageRegistry, derive_label, is_listed};
pub use template::{PageContext, PageTemplate};
pub use watcher::SiteWatcher;
