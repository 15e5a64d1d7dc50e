//! Lexical path handling.
//!
//! Paths in fskit are `/`-separated UTF-8 strings. This module provides
//! normalization, relative path computation, and the few helpers that do
//! need the filesystem (canonicalization for alias detection).
//!
//! # Normalization
//!
//! Normalization is purely lexical:
//! - Trailing separators are trimmed
//! - `.`, `..`, `./x` and `../x` are resolved against the working directory
//! - Empty and `.` segments are dropped, `..` pops the previous segment
//!
//! ```
//! use fskit::path::normalize;
//!
//! assert_eq!(normalize("/tmp/test/path/../../file.txt").unwrap(), "/tmp/file.txt");
//! ```
//!
//! # Relative Paths
//!
//! ```
//! use fskit::path::relative_path;
//!
//! assert_eq!(relative_path("/a/b/c", "/x/y"), "../../x/y");
//! ```

pub mod canonicalize;
pub mod normalize;
pub mod relative;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use normalize::{basename, dirname, is_absolute, normalize, normalize_to};
pub use relative::relative_path;
