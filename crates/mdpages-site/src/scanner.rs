//! File discovery by filesystem walking.
//!
//! The scanner only finds files; it reads no content. Both build stages use
//! it: the page builder walks the source tree for `.md` files and the menu
//! injector walks the output tree for `.html` files.

use std::fs;
use std::path::{Path, PathBuf};

use glob::MatchOptions;

use crate::error::BuildError;

/// Glob options for matching root-relative paths: `*` never crosses a `/`
/// and dotfiles match like any other name.
pub(crate) const PATH_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A file found under a scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TreeFile {
    /// Absolute (or root-joined) path to the file.
    pub path: PathBuf,
    /// Path relative to the scanned root, `/`-separated.
    pub relative: String,
}

/// Walks a directory tree collecting files with one extension.
pub(crate) struct Scanner<'a> {
    root: &'a Path,
    extension: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(root: &'a Path, extension: &'a str) -> Self {
        Self { root, extension }
    }

    /// Collect matching files, depth-first in directory enumeration order.
    ///
    /// Hidden files and directories (leading `.`) are skipped, as are names
    /// that are not valid UTF-8. The order is whatever the filesystem returns
    /// and is not sorted.
    pub fn scan(&self) -> Result<Vec<TreeFile>, BuildError> {
        let mut files = Vec::new();
        self.scan_directory(self.root, "", &mut files)?;
        Ok(files)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        rel_prefix: &str,
        files: &mut Vec<TreeFile>,
    ) -> Result<(), BuildError> {
        let entries = fs::read_dir(dir_path).map_err(|e| BuildError::io(dir_path, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| BuildError::io(dir_path, e))?;
            let path = entry.path();
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = %path.display(), "Skipping non-UTF-8 file name");
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let relative = if rel_prefix.is_empty() {
                name
            } else {
                format!("{rel_prefix}/{name}")
            };

            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.scan_directory(&path, &relative, files)?;
            } else if path.extension().is_some_and(|e| e == self.extension) {
                files.push(TreeFile { path, relative });
            }
        }

        Ok(())
    }
}

/// Convert a source-relative Markdown path to its output-relative HTML path.
///
/// - `index.md` -> `index.html`
/// - `guide/start.md` -> `guide/start.html`
/// - `guide\start.md` -> `guide/start.html`
pub(crate) fn output_path_for(source_relative: &str) -> String {
    let normalized = source_relative.replace('\\', "/");
    let stem = normalized.strip_suffix(".md").unwrap_or(&normalized);
    format!("{stem}.html")
}
