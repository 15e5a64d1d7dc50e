//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, ReaderConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use fskit::config::{Config, ConfigMerger};
///
/// let low = Config { temp_max_attempts: Some(3), ..Default::default() };
/// let high = Config { temp_max_attempts: Some(7), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.temp_max_attempts, Some(7));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge configuration sources into a final config.
    ///
    /// Sources are sorted by precedence before merging, so the highest
    /// precedence value of each field wins.
    #[must_use]
    pub fn merge(mut sources: Vec<ConfigSource>) -> Config {
        sources.sort_by_key(|s| s.precedence);

        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Simple fields are replaced when set in `source`; the reader section
    /// is merged field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.temp_dir.is_some() {
            target.temp_dir.clone_from(&source.temp_dir);
        }

        if source.temp_max_attempts.is_some() {
            target.temp_max_attempts = source.temp_max_attempts;
        }

        if source.hash_algorithm.is_some() {
            target.hash_algorithm = source.hash_algorithm;
        }

        if let Some(ref reader) = source.reader {
            let target_reader = target.reader.get_or_insert_with(ReaderConfig::default);
            Self::merge_reader(target_reader, reader);
        }
    }

    fn merge_reader(target: &mut ReaderConfig, source: &ReaderConfig) {
        if source.chunk_size.is_some() {
            target.chunk_size = source.chunk_size;
        }
        if source.newline.is_some() {
            target.newline.clone_from(&source.newline);
        }
    }
}
