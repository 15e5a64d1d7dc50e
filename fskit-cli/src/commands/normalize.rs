//! Command to normalize a path.

use crate::error::CliError;
use crate::utils::{print_lines, GlobalOptions};
use clap::Args;
use fskit::path::{normalize, normalize_to};

/// Print a path with dot segments and duplicate separators removed.
#[derive(Args)]
pub struct NormalizeCommand {
    /// Path to normalize
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Resolve a relative path against this directory instead of the
    /// working directory
    #[arg(long, value_name = "DIR")]
    pub base: Option<String>,
}

impl NormalizeCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let normalized = match self.base {
            Some(ref base) => normalize_to(&self.path, base)?,
            None => normalize(&self.path)?,
        };
        print_lines([Ok(normalized)])
    }
}
