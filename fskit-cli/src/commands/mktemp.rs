//! Command to create a temp file or directory.

use crate::error::CliError;
use crate::utils::{load_configuration, print_lines, GlobalOptions};
use clap::Args;
use fskit::temp::DEFAULT_PREFIX;
use fskit::{FsEntity, TempRegistry};

/// Create a uniquely named temp file (or directory) and print its path.
///
/// The entity is left in place; removing it is up to the caller.
#[derive(Args)]
pub struct MktempCommand {
    /// File name (`stem.ext`) or directory prefix
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Create a directory instead of a file
    #[arg(long, short = 'd')]
    pub dir: bool,

    /// Base directory (defaults to the configured or platform temp dir)
    #[arg(long, value_name = "DIR")]
    pub base: Option<String>,

    /// Names to try before giving up
    #[arg(long, value_name = "COUNT")]
    pub max_attempts: Option<u32>,
}

impl MktempCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let registry = TempRegistry::from_config(&config)?;
        if let Some(ref base) = self.base {
            registry.set_base_dir(Some(base))?;
        }

        let max_attempts = self.max_attempts.unwrap_or_else(|| registry.max_attempts());
        if max_attempts == 0 {
            return Err(CliError::InvalidArguments(
                "--max-attempts must be greater than 0".to_string(),
            ));
        }

        let name = self.name.as_deref().unwrap_or(DEFAULT_PREFIX);
        let path = if self.dir {
            registry.create_dir(name, max_attempts)?.path().to_string()
        } else {
            registry.create_file(name, max_attempts)?.path().to_string()
        };
        registry.unregister(&path);

        print_lines([Ok(path)])
    }
}
