//! Second build stage: navigation menu injection.
//!
//! Every HTML page in the output tree gets its `<!-- MENU -->` markers
//! replaced with links to all registry entries, relative to the page.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use mdpages_renderer::relative_path;
use rayon::prelude::*;
use regex::{NoExpand, Regex};

use crate::error::BuildError;
use crate::registry::PageRegistry;
use crate::scanner::{Scanner, TreeFile};

/// Menu placeholder: an HTML comment holding only `MENU`.
static MENU_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*MENU\s*-->").expect("invalid menu marker regex"));

/// Build the menu fragment for the page at `page_path`.
///
/// One `<a href="...">label</a>` per registry entry in registry order, joined
/// by single spaces. Hrefs are relative to the page's directory. The page's
/// own entry is included.
#[must_use]
pub fn render_menu(registry: &PageRegistry, page_path: &str) -> String {
    registry
        .iter()
        .map(|entry| {
            format!(
                "<a href=\"{}\">{}</a>",
                relative_path(page_path, &entry.path),
                entry.label
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace every menu marker in `html` with `menu`.
///
/// Returns the input unchanged (borrowed) when there is no marker.
pub fn inject_menu<'a>(html: &'a str, menu: &str) -> Cow<'a, str> {
    MENU_MARKER.replace_all(html, NoExpand(menu))
}

/// Injects navigation menus into rendered pages.
#[derive(Debug, Clone)]
pub struct MenuInjector {
    output_dir: PathBuf,
}

impl MenuInjector {
    /// Create an injector for the given output root.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Inject menus into every HTML page under the output root.
    ///
    /// Pages without a marker are written back unchanged. Returns the number
    /// of pages processed.
    ///
    /// # Errors
    ///
    /// Fails on the first page that cannot be read or written.
    pub fn inject(&self, registry: &PageRegistry) -> Result<usize, BuildError> {
        let pages = Scanner::new(&self.output_dir, "html").scan()?;

        let with_marker = pages
            .par_iter()
            .map(|page| self.inject_page(page, registry))
            .collect::<Result<Vec<bool>, _>>()?
            .into_iter()
            .filter(|&hit| hit)
            .count();

        tracing::info!(
            pages = pages.len(),
            with_marker,
            links = registry.len(),
            "Injected menus"
        );

        Ok(pages.len())
    }

    /// Rewrite one page, returning whether it contained a marker.
    fn inject_page(&self, page: &TreeFile, registry: &PageRegistry) -> Result<bool, BuildError> {
        let html = fs::read_to_string(&page.path).map_err(|e| BuildError::io(&page.path, e))?;

        let menu = render_menu(registry, &page.relative);
        let injected = inject_menu(&html, &menu);
        let has_marker = matches!(injected, Cow::Owned(_));

        fs::write(&page.path, injected.as_bytes()).map_err(|e| BuildError::io(&page.path, e))?;

        tracing::debug!(page = %page.relative, has_marker, "Injected menu");
        Ok(has_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry() -> PageRegistry {
        PageRegistry::from_rendered(["index.html", "guide/start.html", "about.html"])
    }

    #[test]
    fn test_render_menu_from_root() {
        assert_eq!(
            render_menu(&registry(), "index.html"),
            "<a href=\"index.html\">home</a> \
             <a href=\"guide/start.html\">guide - start</a> \
             <a href=\"about.html\">about</a>"
        );
    }

    #[test]
    fn test_render_menu_from_nested_page() {
        assert_eq!(
            render_menu(&registry(), "guide/start.html"),
            "<a href=\"../index.html\">home</a> \
             <a href=\"start.html\">guide - start</a> \
             <a href=\"../about.html\">about</a>"
        );
    }

    #[test]
    fn test_render_menu_home_only() {
        assert_eq!(
            render_menu(&PageRegistry::new(), "a/b/c.html"),
            "<a href=\"../../index.html\">home</a>"
        );
    }

    #[test]
    fn test_inject_menu_replaces_all_markers() {
        let html = "<nav><!-- MENU --></nav><footer><!--MENU--></footer>";
        assert_eq!(
            inject_menu(html, "<a href=\"x\">x</a>"),
            "<nav><a href=\"x\">x</a></nav><footer><a href=\"x\">x</a></footer>"
        );
    }

    #[test]
    fn test_inject_menu_tolerates_whitespace() {
        assert_eq!(inject_menu("<!--\n\t MENU \n-->", "M"), "M");
    }

    #[test]
    fn test_inject_menu_ignores_other_comments() {
        let html = "<!-- MENU: main --><!-- menu --><!-- NAV -->";
        let result = inject_menu(html, "M");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, html);
    }

    #[test]
    fn test_inject_menu_inserts_dollar_signs_literally() {
        assert_eq!(
            inject_menu("<!-- MENU -->", "<a href=\"$1.html\">$1</a>"),
            "<a href=\"$1.html\">$1</a>"
        );
    }

    #[test]
    fn test_inject_rewrites_pages_in_place() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("guide")).unwrap();
        fs::write(dir.path().join("index.html"), "<nav><!-- MENU --></nav>").unwrap();
        fs::write(dir.path().join("guide/start.html"), "<!-- MENU -->|body").unwrap();
        fs::write(dir.path().join("plain.html"), "no marker here").unwrap();
        fs::write(dir.path().join("notes.txt"), "<!-- MENU -->").unwrap();

        let registry = PageRegistry::from_rendered(["guide/start.html", "plain.html"]);
        let count = MenuInjector::new(dir.path()).inject(&registry).unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "<nav><a href=\"index.html\">home</a> \
             <a href=\"guide/start.html\">guide - start</a> \
             <a href=\"plain.html\">plain</a></nav>"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("guide/start.html")).unwrap(),
            "<a href=\"../index.html\">home</a> \
             <a href=\"start.html\">guide - start</a> \
             <a href=\"../plain.html\">plain</a>|body"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("plain.html")).unwrap(),
            "no marker here"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "<!-- MENU -->"
        );
    }

    #[test]
    fn test_inject_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = MenuInjector::new(dir.path().join("pages"))
            .inject(&PageRegistry::new())
            .unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }
}
