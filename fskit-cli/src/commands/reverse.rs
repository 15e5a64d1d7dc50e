//! Command to print a file's lines in reverse order.

use crate::error::CliError;
use crate::utils::{load_configuration, print_lines, GlobalOptions};
use clap::Args;
use fskit::config::EnvironmentConfig;
use fskit::ReverseLineReader;

/// Print the lines of a file, last line first.
#[derive(Args)]
pub struct ReverseCommand {
    /// File to read
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Line delimiter; `\n`, `\r` and `\t` escapes are expanded
    #[arg(long, value_name = "DELIMITER")]
    pub newline: Option<String>,

    /// Bytes read per chunk
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// Stop after this many lines
    #[arg(long, short = 'n', value_name = "COUNT")]
    pub limit: Option<usize>,
}

impl ReverseCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let newline = self
            .newline
            .as_deref()
            .map_or_else(|| config.newline().to_string(), EnvironmentConfig::unescape);
        let chunk_size = self.chunk_size.unwrap_or_else(|| config.chunk_size());

        let reader = ReverseLineReader::open(&self.file, &newline, chunk_size)?;
        let limit = self.limit.unwrap_or(usize::MAX);
        print_lines(reader.take(limit).map(|line| line.map_err(CliError::from)))
    }
}
