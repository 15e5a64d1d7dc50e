//! Configuration validation.

use crate::config::schema::{Config, ReaderConfig};
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use fskit::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref dir) = config.temp_dir {
            if dir.trim().is_empty() {
                return Err(Error::Validation {
                    field: "temp_dir".into(),
                    message: "Temp directory cannot be empty".into(),
                });
            }
        }

        if config.temp_max_attempts == Some(0) {
            return Err(Error::Validation {
                field: "temp_max_attempts".into(),
                message: "Must be greater than 0".into(),
            });
        }

        if let Some(ref reader) = config.reader {
            Self::validate_reader(reader)?;
        }

        Ok(())
    }

    fn validate_reader(reader: &ReaderConfig) -> Result<()> {
        if reader.chunk_size == Some(0) {
            return Err(Error::Validation {
                field: "reader.chunk_size".into(),
                message: "Chunk size must be greater than 0".into(),
            });
        }

        if reader.newline.as_deref().is_some_and(str::is_empty) {
            return Err(Error::Validation {
                field: "reader.newline".into(),
                message: "Line delimiter cannot be empty".into(),
            });
        }

        Ok(())
    }
}
