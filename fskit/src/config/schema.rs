//! Configuration schema definitions.
//!
//! Every field is optional so that sources can be layered; the accessor
//! methods on [`Config`] fill in the built-in defaults.

use serde::{Deserialize, Serialize};

use crate::hasher::DigestAlgorithm;
use crate::reader::{DEFAULT_CHUNK_SIZE, DEFAULT_NEWLINE};
use crate::temp::DEFAULT_MAX_ATTEMPTS;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use fskit::config::{Config, ReaderConfig};
///
/// let config = Config {
///     temp_max_attempts: Some(3),
///     reader: Some(ReaderConfig {
///         chunk_size: Some(4096),
///         newline: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.chunk_size(), 4096);
/// assert_eq!(config.newline(), "\n");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base directory for temp entities (defaults to the platform temp dir).
    pub temp_dir: Option<String>,

    /// How many names to try before temp creation gives up.
    pub temp_max_attempts: Option<u32>,

    /// Reverse reader settings.
    pub reader: Option<ReaderConfig>,

    /// Digest used by the directory hasher.
    pub hash_algorithm: Option<DigestAlgorithm>,
}

/// Reverse line reader settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReaderConfig {
    /// Bytes read per chunk.
    pub chunk_size: Option<usize>,

    /// Line delimiter.
    pub newline: Option<String>,
}

impl Config {
    /// Effective temp attempt budget.
    #[must_use]
    pub fn temp_max_attempts(&self) -> u32 {
        self.temp_max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// Effective reader chunk size.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.reader
            .as_ref()
            .and_then(|r| r.chunk_size)
            .unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    /// Effective line delimiter.
    #[must_use]
    pub fn newline(&self) -> &str {
        self.reader
            .as_ref()
            .and_then(|r| r.newline.as_deref())
            .unwrap_or(DEFAULT_NEWLINE)
    }

    /// Effective digest algorithm.
    #[must_use]
    pub fn hash_algorithm(&self) -> DigestAlgorithm {
        self.hash_algorithm.unwrap_or_default()
    }
}
