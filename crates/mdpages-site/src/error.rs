//! Error types for building and watching a site.

use std::path::{Path, PathBuf};

/// Error returned by a build cycle.
///
/// Every variant is fatal for the cycle that produced it.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source root does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source pattern is not a valid glob.
    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Page template file does not exist.
    #[error("Page template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Page template failed to parse or render.
    #[error("Template error in {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
}

impl BuildError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Error returned by the file watcher.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Watched directory could not be resolved.
    #[error("Cannot watch {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Watch pattern is not a valid glob.
    #[error("Invalid watch pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Underlying notification backend failed.
    #[error("File watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// Event channel closed.
    #[error("File watcher stopped")]
    Disconnected,
}
