//! First build stage: Markdown sources to wrapped HTML pages.

use std::fs;
use std::path::PathBuf;

use glob::Pattern;
use mdpages_config::PathsConfig;
use mdpages_renderer::{render_markdown, rewrite_md_links};
use rayon::prelude::*;

use crate::error::BuildError;
use crate::registry::PageRegistry;
use crate::scanner::{PATH_MATCH_OPTIONS, Scanner, TreeFile, output_path_for};
use crate::template::{PageContext, PageTemplate};

/// Outcome of the page building stage.
#[derive(Debug, Clone)]
pub struct BuiltSite {
    /// Output paths of every rendered page, in processing order.
    pub pages: Vec<String>,
    /// Navigation registry for the menu injection stage.
    pub registry: PageRegistry,
}

/// Renders every Markdown source into a wrapped HTML page.
///
/// Sources are the `.md` files under the source root whose relative path
/// matches the source pattern (`**/*.md` unless configured otherwise).
/// Each source is processed independently:
/// 1. Read the Markdown text
/// 2. Rewrite `.md` links to `.html`
/// 3. Render to HTML
/// 4. Wrap in the page template
/// 5. Write to the mirrored path under the output root
///
/// Pages are processed in parallel; the registry is assembled afterwards in
/// source enumeration order.
#[derive(Debug)]
pub struct PageBuilder {
    source_dir: PathBuf,
    output_dir: PathBuf,
    source_pattern: Pattern,
    template: PageTemplate,
}

impl PageBuilder {
    /// Create a builder from resolved paths, loading the page template.
    ///
    /// `source_pattern` selects which sources are built, matched against
    /// paths relative to the source root.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or the template is
    /// missing or invalid.
    pub fn new(paths: &PathsConfig, source_pattern: &str) -> Result<Self, BuildError> {
        let source_pattern = Pattern::new(source_pattern)?;
        let template = PageTemplate::load(&paths.template)?;
        Ok(Self::with_template(
            paths.source_dir.clone(),
            paths.output_dir.clone(),
            source_pattern,
            template,
        ))
    }

    /// Create a builder with an already loaded template.
    #[must_use]
    pub fn with_template(
        source_dir: PathBuf,
        output_dir: PathBuf,
        source_pattern: Pattern,
        template: PageTemplate,
    ) -> Self {
        Self {
            source_dir,
            output_dir,
            source_pattern,
            template,
        }
    }

    /// Render all sources and return the page registry.
    ///
    /// # Errors
    ///
    /// Fails on the first source that cannot be read, rendered or written.
    /// Pages written before the failure stay on disk.
    pub fn build(&self) -> Result<BuiltSite, BuildError> {
        if !self.source_dir.is_dir() {
            return Err(BuildError::SourceNotFound(self.source_dir.clone()));
        }

        let sources: Vec<TreeFile> = Scanner::new(&self.source_dir, "md")
            .scan()?
            .into_iter()
            .filter(|source| {
                self.source_pattern
                    .matches_with(&source.relative, PATH_MATCH_OPTIONS)
            })
            .collect();
        tracing::debug!(
            sources = sources.len(),
            dir = %self.source_dir.display(),
            "Discovered sources"
        );

        let pages = sources
            .par_iter()
            .map(|source| self.build_page(source))
            .collect::<Result<Vec<_>, _>>()?;

        let registry = PageRegistry::from_rendered(pages.iter().map(String::as_str));

        tracing::info!(
            pages = pages.len(),
            entries = registry.len(),
            "Built pages"
        );

        Ok(BuiltSite { pages, registry })
    }

    /// Render one source file and write it, returning its output path.
    fn build_page(&self, source: &TreeFile) -> Result<String, BuildError> {
        let markdown =
            fs::read_to_string(&source.path).map_err(|e| BuildError::io(&source.path, e))?;

        let output_rel = output_path_for(&source.relative);
        let html = self.render_page(&markdown, &source.relative, &output_rel)?;

        let output_path = self.output_path(&output_rel);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        fs::write(&output_path, html).map_err(|e| BuildError::io(&output_path, e))?;

        tracing::debug!(source = %source.relative, page = %output_rel, "Rendered page");
        Ok(output_rel)
    }

    /// Turn Markdown text into a complete wrapped page.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Template`] if the template fails to render.
    pub fn render_page(
        &self,
        markdown: &str,
        source_rel: &str,
        output_rel: &str,
    ) -> Result<String, BuildError> {
        let markdown = rewrite_md_links(markdown);
        let content = render_markdown(&markdown);
        self.template.wrap(PageContext {
            content: &content,
            path: output_rel,
            source: source_rel,
        })
    }

    fn output_path(&self, output_rel: &str) -> PathBuf {
        output_rel
            .split('/')
            .fold(self.output_dir.clone(), |path, segment| path.join(segment))
    }
}
