//! Lexical path normalization.
//!
//! Paths are treated as `/`-separated strings. Normalization removes empty
//! and `.` segments and folds `..` into the preceding segment without ever
//! touching the filesystem. The only I/O is reading the current working
//! directory for the literal forms `.`, `..`, `./x` and `../x`.

use std::env;

use crate::error::{Error, Result};

/// The path separator used by every function in this module.
pub const SEPARATOR: char = '/';

/// Determine whether a path is absolute (its first character is `/`).
///
/// # Examples
///
/// ```
/// use fskit::path::normalize::is_absolute;
///
/// assert!(is_absolute("/file.txt"));
/// assert!(!is_absolute(".file.txt"));
/// assert!(!is_absolute("\\file.txt"));
/// ```
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// Fold `.`, `..` and empty segments out of a path without consulting the
/// working directory.
///
/// A `..` that would climb above the first segment is dropped. The result is
/// absolute iff the input is.
///
/// # Examples
///
/// ```
/// use fskit::path::normalize::resolve_segments;
///
/// assert_eq!(resolve_segments("/tmp///path/.//file.txt"), "/tmp/path/file.txt");
/// assert_eq!(resolve_segments("/a/b/../../.."), "/");
/// assert_eq!(resolve_segments("a/./b/.."), "a");
/// ```
#[must_use]
pub fn resolve_segments(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                kept.pop();
            }
            other => kept.push(other),
        }
    }

    let joined = kept.join("/");
    if is_absolute(path) {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Normalize a path lexically.
///
/// Trailing separators are trimmed first. The literal values `.` and `..`
/// and the prefixes `./` and `../` are resolved against the current working
/// directory; any other leading-dot form (a hidden file name such as
/// `.file.txt`) is left as a relative path.
///
/// # Errors
///
/// Returns [`Error::CurrentDirUnavailable`] when the path needs the working
/// directory and it cannot be read.
///
/// # Examples
///
/// ```
/// use fskit::path::normalize::normalize;
///
/// assert_eq!(normalize("/tmp/path/../file.txt").unwrap(), "/tmp/file.txt");
/// assert_eq!(normalize("/test/./path/one/..").unwrap(), "/test/path");
/// assert_eq!(normalize(".file.txt").unwrap(), ".file.txt");
///
/// let cwd = std::env::current_dir().unwrap();
/// assert_eq!(normalize("./x").unwrap(), format!("{}/x", cwd.display()));
/// ```
pub fn normalize(path: &str) -> Result<String> {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        // Either "" or a run of separators, which is the root.
        return Ok(if path.is_empty() { String::new() } else { "/".to_string() });
    }

    let expanded = if trimmed.starts_with('.') {
        expand_leading_dots(trimmed)?
    } else {
        trimmed.to_string()
    };

    Ok(resolve_segments(&expanded))
}

/// Normalize `path` relative to `base_dir`.
///
/// Absolute paths are returned unchanged (not even normalized); relative
/// paths are appended to `base_dir` and normalized.
///
/// # Errors
///
/// Propagates errors from [`normalize`].
///
/// # Examples
///
/// ```
/// use fskit::path::normalize::normalize_to;
///
/// assert_eq!(normalize_to("/file.txt", "/test/path").unwrap(), "/file.txt");
/// assert_eq!(normalize_to("../file.txt", "/test/path").unwrap(), "/test/file.txt");
/// assert_eq!(normalize_to(".file.txt", "/test/path").unwrap(), "/test/path/.file.txt");
/// ```
pub fn normalize_to(path: &str, base_dir: &str) -> Result<String> {
    if is_absolute(path) {
        return Ok(path.to_string());
    }
    normalize(&format!("{base_dir}/{path}"))
}

/// The directory component of a path, following POSIX `dirname`.
///
/// # Examples
///
/// ```
/// use fskit::path::normalize::dirname;
///
/// assert_eq!(dirname("/a/b/c/test"), "/a/b/c");
/// assert_eq!(dirname("/a"), "/");
/// assert_eq!(dirname("/"), "/");
/// assert_eq!(dirname("name"), ".");
/// ```
#[must_use]
pub fn dirname(path: &str) -> String {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return if path.is_empty() { ".".to_string() } else { "/".to_string() };
    }
    match trimmed.rfind(SEPARATOR) {
        None => ".".to_string(),
        Some(idx) => {
            let parent = trimmed[..idx].trim_end_matches(SEPARATOR);
            if parent.is_empty() {
                "/".to_string()
            } else {
                parent.to_string()
            }
        }
    }
}

/// The final component of a path, ignoring trailing separators.
///
/// # Examples
///
/// ```
/// use fskit::path::normalize::basename;
///
/// assert_eq!(basename("/a/b/c/"), "c");
/// assert_eq!(basename("/a/b/c/.name"), ".name");
/// assert_eq!(basename("name"), "name");
/// ```
#[must_use]
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    match trimmed.rfind(SEPARATOR) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

fn current_dir() -> Result<String> {
    let cwd = env::current_dir().map_err(Error::CurrentDirUnavailable)?;
    cwd.into_os_string()
        .into_string()
        .map_err(|raw| Error::InvalidPath {
            path: raw.into(),
            reason: "current directory is not valid UTF-8".to_string(),
        })
}

fn expand_leading_dots(path: &str) -> Result<String> {
    if path == "." {
        return current_dir();
    }
    if path == ".." {
        return Ok(dirname(&current_dir()?));
    }
    if let Some(rest) = path.strip_prefix("./") {
        return Ok(format!("{}/{rest}", current_dir()?));
    }
    if let Some(rest) = path.strip_prefix("../") {
        return Ok(format!("{}/{rest}", dirname(&current_dir()?)));
    }
    Ok(path.to_string())
}
