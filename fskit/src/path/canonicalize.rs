//! Canonicalization.
//!
//! Unlike the lexical functions in [`super::normalize`], these follow
//! symlinks and therefore require the path to exist.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Resolve every symlink in `path` and return the real absolute path.
///
/// # Errors
///
/// Returns `PathNotFound` or `PermissionDenied` for the matching I/O
/// failures, `InvalidPath` if the resolved path is not valid UTF-8, and
/// `Io` otherwise.
///
/// # Examples
///
/// ```no_run
/// use fskit::path::canonicalize::canonicalize;
///
/// let real = canonicalize("/tmp/./").unwrap();
/// assert!(real.starts_with('/'));
/// ```
pub fn canonicalize(path: &str) -> Result<String> {
    let real = fs::canonicalize(path).map_err(|e| Error::from_io(Path::new(path), e))?;
    real.into_os_string()
        .into_string()
        .map_err(|raw| Error::InvalidPath {
            path: raw.into(),
            reason: "canonical path is not valid UTF-8".to_string(),
        })
}
