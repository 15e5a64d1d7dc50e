//! Relative path computation between two lexical paths.

use super::normalize::SEPARATOR;

/// Compute the path that leads from `from` to `to`.
///
/// Both paths are split on `/` and compared segment by segment from the
/// start. The last segment of `from` is treated as a file name, so the number
/// of `../` steps is one less than the number of unmatched `from` segments.
/// A `from` ending in `/` therefore behaves like a directory: its trailing
/// empty segment stands in for the file name. When `from` is a prefix of `to`
/// no ascent is emitted at all. A trailing `/` on `to` is dropped.
///
/// # Examples
///
/// ```
/// use fskit::path::relative_path;
///
/// assert_eq!(relative_path("/one/two/file.txt", "/one/file.txt"), "../file.txt");
/// assert_eq!(relative_path("/a/b/c", "/x/y"), "../../x/y");
/// assert_eq!(relative_path("/a/b/c", "/a/b/c/d/e/f"), "d/e/f");
/// assert_eq!(relative_path("/a/b/c", "/a/b/c"), "");
/// ```
#[must_use]
pub fn relative_path(from: &str, to: &str) -> String {
    let from_parts: Vec<&str> = from.split(SEPARATOR).collect();
    let mut to_parts: Vec<&str> = to.split(SEPARATOR).collect();
    if to_parts.len() > 1 && to_parts.last() == Some(&"") {
        to_parts.pop();
    }

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let ascent = from_parts.len().saturating_sub(common + 1);
    let mut out = "../".repeat(ascent);
    out.push_str(&to_parts[common..].join("/"));
    out
}
