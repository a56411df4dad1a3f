//! Shared page template wrapping every rendered page.
//!
//! The template is a `minijinja` template with these variables:
//!
//! - `content`: rendered HTML of the page
//! - `contents`: same as `content`
//! - `path`: output path relative to the output root
//! - `source`: source path relative to the source root
//!
//! Auto-escaping is off so the HTML fragment is inlined verbatim, and a
//! trailing newline in the template file is kept.

use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, context};

use crate::error::BuildError;

/// Name the template is registered under in the environment.
const TEMPLATE_NAME: &str = "page";

/// Page-specific values exposed to the template.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Rendered HTML fragment.
    pub content: &'a str,
    /// Output path relative to the output root.
    pub path: &'a str,
    /// Source path relative to the source root.
    pub source: &'a str,
}

/// Page template loaded from disk.
pub struct PageTemplate {
    env: Environment<'static>,
    path: PathBuf,
}

impl std::fmt::Debug for PageTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageTemplate")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl PageTemplate {
    /// Load and parse the template file.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::TemplateNotFound`] if the file is missing,
    /// [`BuildError::Io`] if it cannot be read, and [`BuildError::Template`]
    /// if it does not parse.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BuildError::TemplateNotFound(path.to_path_buf())
            } else {
                BuildError::io(path, e)
            }
        })?;
        Self::from_source(source, path)
    }

    /// Build a template from source text.
    ///
    /// `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Template`] if the source does not parse.
    pub fn from_source(source: impl Into<String>, path: &Path) -> Result<Self, BuildError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.add_template_owned(TEMPLATE_NAME, source.into())
            .map_err(|e| template_error(path, e))?;

        Ok(Self {
            env,
            path: path.to_path_buf(),
        })
    }

    /// Wrap a rendered page in the template.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Template`] if rendering fails.
    pub fn wrap(&self, page: PageContext<'_>) -> Result<String, BuildError> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| template_error(&self.path, e))?;
        template
            .render(context! {
                content => page.content,
                contents => page.content,
                path => page.path,
                source => page.source,
            })
            .map_err(|e| template_error(&self.path, e))
    }
}

fn template_error(path: &Path, source: minijinja::Error) -> BuildError {
    BuildError::Template {
        path: path.to_path_buf(),
        source,
    }
}
