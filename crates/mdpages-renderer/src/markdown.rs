//! Markdown to HTML rendering.

use pulldown_cmark::{Options, Parser, html::push_html};

/// GitHub Flavored Markdown: tables, strikethrough, task lists and alerts.
const GFM_OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_GFM);

/// Render Markdown text to an HTML fragment.
///
/// Rendering never fails: any input text yields a fragment. Raw HTML,
/// including comments such as `<!-- MENU -->`, passes through unchanged.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    push_html(&mut html, Parser::new_ext(markdown, GFM_OPTIONS));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_heading_and_paragraph() {
        assert_eq!(
            render_markdown("# Hello\n\nWorld"),
            "<h1>Hello</h1>\n<p>World</p>\n"
        );
    }

    #[test]
    fn test_render_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn test_render_strikethrough_and_tasklist() {
        let html = render_markdown("~~old~~\n\n- [x] done\n");
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_render_link() {
        assert_eq!(
            render_markdown("[guide](guide/start.html)"),
            "<p><a href=\"guide/start.html\">guide</a></p>\n"
        );
    }

    #[test]
    fn test_render_keeps_raw_html_comments() {
        assert_eq!(render_markdown("<!-- MENU -->\n"), "<!-- MENU -->\n");
    }

    #[test]
    fn test_render_empty_input() {
        assert_eq!(render_markdown(""), "");
    }
}
