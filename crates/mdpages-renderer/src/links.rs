//! Rewriting of links between Markdown sources.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Inline link whose target ends in `.md` immediately before the closing paren.
///
/// Group 1 captures everything up to (not including) the `.md` suffix.
static MD_LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\[[^\]]+\]\([^\)]+)\.md\)").expect("invalid markdown link regex")
});

/// Rewrite `[label](target.md)` links to `[label](target.html)`.
///
/// Only links whose target ends in literal `.md)` match, so a link with a
/// title such as `[x](y.md "title")` is left untouched. All occurrences are
/// rewritten; everything before the `.md)` suffix is kept verbatim.
///
/// Returns the input unchanged (borrowed) when nothing matches.
pub fn rewrite_md_links(markdown: &str) -> Cow<'_, str> {
    MD_LINK_PATTERN.replace_all(markdown, "${1}.html)")
}
