//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from every source in precedence order.
///
/// # Examples
///
/// ```
/// use fskit::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { temp_max_attempts: Some(4), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(config.temp_max_attempts(), 4);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    user_config_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// A builder that reads the user config and the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for `config.yaml` in `dir` instead of `~/.fskit`.
    #[must_use]
    pub fn with_user_config_dir(mut self, dir: &Path) -> Self {
        self.user_config_dir = Some(dir.to_path_buf());
        self
    }

    /// Also load `path`, which must exist and outranks the user config.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Programmatic values that outrank every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Do not discover the user configuration file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `FSKIT_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Merge all sources and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut sources: Vec<ConfigSource> = Vec::new();

        if !self.skip_files {
            let user_source = match self.user_config_dir {
                Some(ref dir) => ConfigLoader::load_user_config(Some(dir))?,
                None if home::home_dir().is_none() => {
                    log::debug!("no home directory; skipping user config");
                    None
                }
                None => ConfigLoader::load_user_config(None)?,
            };
            if let Some(source) = user_source {
                log::debug!("loaded user config from {}", source.path.display());
                sources.push(source);
            }
        }

        if let Some(ref path) = self.config_file {
            sources.push(ConfigLoader::load_explicit(path)?);
            log::debug!("loaded config from {}", path.display());
        }

        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
