//! Command to compute a relative path.

use crate::error::CliError;
use crate::utils::{print_lines, GlobalOptions};
use clap::Args;
use fskit::path::relative_path;

/// Print the path that leads from one path to another.
///
/// A trailing `/` on FROM marks it as a directory.
#[derive(Args)]
pub struct RelativeCommand {
    /// Starting path
    #[arg(value_name = "FROM")]
    pub from: String,

    /// Target path
    #[arg(value_name = "TO")]
    pub to: String,
}

impl RelativeCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        print_lines([Ok(relative_path(&self.from, &self.to))])
    }
}
