//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `FSKIT_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, ReaderConfig};
use crate::error::{Error, Result};
use crate::hasher::DigestAlgorithm;
use std::env;

/// Override for [`Config::temp_dir`].
pub const ENV_TEMP_DIR: &str = "FSKIT_TEMP_DIR";
/// Override for [`Config::temp_max_attempts`].
pub const ENV_TEMP_MAX_ATTEMPTS: &str = "FSKIT_TEMP_MAX_ATTEMPTS";
/// Override for the reader chunk size.
pub const ENV_READ_CHUNK_SIZE: &str = "FSKIT_READ_CHUNK_SIZE";
/// Override for the reader line delimiter.
pub const ENV_NEWLINE: &str = "FSKIT_NEWLINE";
/// Override for [`Config::hash_algorithm`].
pub const ENV_HASH_ALGORITHM: &str = "FSKIT_HASH_ALGORITHM";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use fskit::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or algorithm value cannot be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(dir) = env::var(ENV_TEMP_DIR) {
            config.temp_dir = Some(dir);
        }

        if let Ok(val) = env::var(ENV_TEMP_MAX_ATTEMPTS) {
            config.temp_max_attempts = Some(Self::parse_number(ENV_TEMP_MAX_ATTEMPTS, &val)?);
        }

        if let Ok(val) = env::var(ENV_READ_CHUNK_SIZE) {
            let size = Self::parse_number(ENV_READ_CHUNK_SIZE, &val)?;
            Self::reader(config).chunk_size = Some(size);
        }

        if let Ok(newline) = env::var(ENV_NEWLINE) {
            Self::reader(config).newline = Some(Self::unescape(&newline));
        }

        if let Ok(val) = env::var(ENV_HASH_ALGORITHM) {
            let algorithm: DigestAlgorithm = val.parse().map_err(|_| Error::Validation {
                field: ENV_HASH_ALGORITHM.into(),
                message: format!("Unknown algorithm '{val}'; expected sha256 or sha512"),
            })?;
            config.hash_algorithm = Some(algorithm);
        }

        Ok(())
    }

    fn reader(config: &mut Config) -> &mut ReaderConfig {
        config.reader.get_or_insert_with(ReaderConfig::default)
    }

    fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a positive integer, got '{value}'"),
        })
    }

    /// Expand `\n`, `\r`, `\t` and `\\` so delimiters can be given in a shell.
    #[must_use]
    pub fn unescape(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut chars = value.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        }
        out
    }
}
