//! Ordered registry of navigable pages.
//!
//! The registry is built once per build cycle from the pages the
//! [`PageBuilder`](crate::PageBuilder) rendered, then handed to the
//! [`MenuInjector`](crate::MenuInjector) as an immutable value.

/// Relative output path of the home page.
pub const HOME_PATH: &str = "index.html";

/// Label of the home page.
pub const HOME_LABEL: &str = "home";

/// Pages rendered but never given their own registry entry.
const UNLISTED_PATHS: [&str; 2] = [HOME_PATH, "license.html"];

/// A navigable page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageEntry {
    /// Output path relative to the output root, `/`-separated.
    pub path: String,
    /// Navigation label.
    pub label: String,
}

impl PageEntry {
    /// Create an entry for `path` with its derived label.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            label: derive_label(path),
        }
    }

    fn home() -> Self {
        Self {
            path: HOME_PATH.to_owned(),
            label: HOME_LABEL.to_owned(),
        }
    }
}

/// Derive a navigation label from a relative output path.
///
/// Strips a trailing `.html` and replaces the first `/` with `" - "`.
/// Later separators are kept.
///
/// # Examples
///
/// ```
/// use mdpages_site::derive_label;
///
/// assert_eq!(derive_label("docs/setup.html"), "docs - setup");
/// assert_eq!(derive_label("about.html"), "about");
/// assert_eq!(derive_label("a/b/c.html"), "a - b/c");
/// ```
#[must_use]
pub fn derive_label(path: &str) -> String {
    let stem = path.strip_suffix(".html").unwrap_or(path);
    stem.replacen('/', " - ", 1)
}

/// Whether a rendered page gets its own registry entry.
#[must_use]
pub fn is_listed(path: &str) -> bool {
    !UNLISTED_PATHS.contains(&path)
}

/// Ordered list of navigable pages.
///
/// The home entry is always present and always first. Every other entry
/// corresponds to one rendered page, in the order the pages were processed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRegistry {
    entries: Vec<PageEntry>,
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRegistry {
    /// Create a registry holding only the home entry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![PageEntry::home()],
        }
    }

    /// Build a registry from rendered output paths in processing order.
    ///
    /// Paths excluded by [`is_listed`] are skipped.
    pub fn from_rendered<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self::new();
        for path in paths {
            registry.record(path);
        }
        registry
    }

    /// Record a rendered page, appending an entry unless it is unlisted.
    ///
    /// Returns `true` if an entry was appended.
    pub fn record(&mut self, path: &str) -> bool {
        if !is_listed(path) {
            return false;
        }
        self.entries.push(PageEntry::for_path(path));
        true
    }

    /// Entries in navigation order.
    #[must_use]
    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    /// Number of entries, including home.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the home entry is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in navigation order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PageRegistry {
    type Item = &'a PageEntry;
    type IntoIter = std::slice::Iter<'a, PageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_derive_label_nested() {
        assert_eq!(derive_label("docs/setup.html"), "docs - setup");
    }

    #[test]
    fn test_derive_label_flat() {
        assert_eq!(derive_label("about.html"), "about");
    }

    #[test]
    fn test_derive_label_replaces_first_separator_only() {
        assert_eq!(derive_label("a/b/c.html"), "a - b/c");
    }

    #[test]
    fn test_derive_label_only_trailing_extension() {
        assert_eq!(derive_label("notes.html.html"), "notes.html");
        assert_eq!(derive_label("html/intro.html"), "html - intro");
    }

    #[test]
    fn test_new_registry_has_home_only() {
        let registry = PageRegistry::new();
        assert_eq!(
            registry.entries(),
            &[PageEntry {
                path: "index.html".to_owned(),
                label: "home".to_owned(),
            }]
        );
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_home_first_regardless_of_order() {
        let registry =
            PageRegistry::from_rendered(["zeta.html", "index.html", "alpha/one.html"]);
        let paths: Vec<&str> = registry.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["index.html", "zeta.html", "alpha/one.html"]);
    }

    #[test]
    fn test_index_source_adds_no_extra_entry() {
        let registry = PageRegistry::from_rendered(["index.html", "about.html"]);
        let homes = registry
            .iter()
            .filter(|e| e.path == HOME_PATH)
            .count();
        assert_eq!(homes, 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_license_never_listed() {
        let mut registry = PageRegistry::new();
        assert!(!registry.record("license.html"));
        assert!(registry.iter().all(|e| e.path != "license.html"));
    }

    #[test]
    fn test_nested_license_and_index_are_listed() {
        let registry = PageRegistry::from_rendered(["docs/index.html", "docs/license.html"]);
        assert_eq!(
            &registry.entries()[1..],
            &[
                PageEntry::for_path("docs/index.html"),
                PageEntry::for_path("docs/license.html"),
            ]
        );
        assert_eq!(registry.entries()[1].label, "docs - index");
    }

    #[test]
    fn test_entries_keep_processing_order() {
        let registry = PageRegistry::from_rendered(["b.html", "a.html", "c/d.html"]);
        let labels: Vec<&str> = (&registry).into_iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["home", "b", "a", "c - d"]);
    }
}
