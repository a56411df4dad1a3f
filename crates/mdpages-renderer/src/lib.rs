//! Markdown link rewriting and HTML rendering for mdpages.
//!
//! This crate holds the text-level transforms applied to every page:
//!
//! - [`rewrite_md_links`]: points `[label](target.md)` links at the rendered
//!   `.html` pages instead
//! - [`render_markdown`]: GitHub Flavored Markdown to HTML via `pulldown-cmark`
//! - [`relative_path`]: link targets between pages of the output tree
//!
//! # Example
//!
//! ```
//! use mdpages_renderer::{render_markdown, rewrite_md_links};
//!
//! let markdown = rewrite_md_links("See [setup](guide/setup.md).");
//! let html = render_markdown(&markdown);
//! assert_eq!(html, "<p>See <a href=\"guide/setup.html\">setup</a>.</p>\n");
//! ```

mod links;
mod markdown;
mod util;

pub use links::rewrite_md_links;
pub use markdown::render_markdown;
pub use util::relative_path;
