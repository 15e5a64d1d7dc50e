//! Error types for the fskit library.
//!
//! This module provides the error hierarchy for all fallible operations in
//! fskit, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an fskit error.
///
/// # Examples
///
/// ```
/// use fskit::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(8192)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the fskit library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// The current working directory could not be determined.
    #[error("cannot determine current directory: {0}")]
    CurrentDirUnavailable(#[source] std::io::Error),

    /// An entity failed a type or permission test.
    #[error("'{}' {reason}", path.display())]
    EntityTest {
        /// The entity path that was tested.
        path: PathBuf,
        /// The first predicate that failed, e.g. "is not readable".
        reason: String,
    },

    /// The configured temp directory override is unusable.
    #[error("invalid temp directory {}: {reason}", path.display())]
    InvalidTempDir {
        /// The rejected directory.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// No unique temp name could be created within the attempt budget.
    #[error("failed to create temp entity '{prefix}'; reached max number ({attempts}) of attempts")]
    TempNameExhausted {
        /// The sanitized prefix or file name that was used.
        prefix: String,
        /// Number of attempts made.
        attempts: u32,
        /// The last underlying failure, if any attempt reached the filesystem.
        #[source]
        source: Option<std::io::Error>,
    },

    /// Two files map to the same case-folded key while hashing a directory.
    #[error("duplicate file encountered: {path} (collides with {existing})")]
    DuplicateFile {
        /// The relative path that was encountered second.
        path: String,
        /// The relative path already recorded under the same folded key.
        existing: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// Serialization of hash output failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File content was not valid UTF-8 where text was required.
    #[error("invalid UTF-8 in {}: {source}", path.display())]
    InvalidEncoding {
        /// The file being read.
        path: PathBuf,
        /// The decoding failure.
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use fskit::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::PathNotFound { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use fskit::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PermissionDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::PermissionDenied { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }

    /// Map an I/O error on `path` into the most specific variant.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::PathNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io(err),
        }
    }
}
