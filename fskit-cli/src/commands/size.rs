//! Command to print a file's size.

use crate::error::CliError;
use crate::utils::{print_lines, GlobalOptions};
use clap::Args;
use fskit::FileEntity;

/// Print the size of a file in human-readable units.
#[derive(Args)]
pub struct SizeCommand {
    /// File to measure
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Digits after the decimal point for scaled units
    #[arg(long, short = 'p', value_name = "DIGITS", default_value_t = 0)]
    pub precision: usize,

    /// Print the raw byte count instead
    #[arg(long, conflicts_with = "precision")]
    pub bytes: bool,
}

impl SizeCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let file = FileEntity::new(self.file);
        let size = if self.bytes {
            file.byte_size()?.to_string()
        } else {
            file.formatted_size(self.precision)?
        };
        print_lines([Ok(size)])
    }
}
