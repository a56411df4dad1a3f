//! Path helpers for links between output pages.

/// Compute the relative link from one output page to another.
///
/// Both `from` and `to` are `/`-separated paths relative to the output
/// root, e.g. `guide/start.html`. The last segment of `from` is the page
/// itself; the link is resolved from the directory containing it.
///
/// # Examples
///
/// ```
/// use mdpages_renderer::relative_path;
///
/// assert_eq!(relative_path("guide/start.html", "index.html"), "../index.html");
/// assert_eq!(relative_path("index.html", "guide/start.html"), "guide/start.html");
/// assert_eq!(relative_path("index.html", "index.html"), "index.html");
/// ```
pub fn relative_path(from: &str, to: &str) -> String {
    let (from_dirs, _) = split_page(from);
    let (to_dirs, to_page) = split_page(to);

    let shared = from_dirs
        .iter()
        .zip(&to_dirs)
        .take_while(|(a, b)| a == b)
        .count();

    let mut link = "../".repeat(from_dirs.len() - shared);
    for dir in &to_dirs[shared..] {
        link.push_str(dir);
        link.push('/');
    }
    link.push_str(to_page);
    link
}

/// Split a page path into its directory segments and file name.
fn split_page(page: &str) -> (Vec<&str>, &str) {
    match page.rsplit_once('/') {
        Some((dir, name)) => (dir.split('/').collect(), name),
        None => (Vec::new(), page),
    }
}
