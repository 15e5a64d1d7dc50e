//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckCommand, HashCommand, MktempCommand, NormalizeCommand, RelativeCommand, ReverseCommand,
    SizeCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line front end for the fskit filesystem toolkit.
#[derive(Parser)]
#[command(name = "fskit")]
#[command(version, about = "Filesystem toolkit", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Load configuration from this file as well
    #[arg(long, value_name = "PATH", global = true, env = "FSKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Lexically normalize a path
    Normalize(NormalizeCommand),

    /// Compute the relative path between two paths
    Relative(RelativeCommand),

    /// Print a file's lines, last line first
    Reverse(ReverseCommand),

    /// Hash the contents of a directory tree
    Hash(HashCommand),

    /// Test a path for existence, type and permissions
    Check(CheckCommand),

    /// Print a file's size
    Size(SizeCommand),

    /// Create a uniquely named temp file or directory
    Mktemp(MktempCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fskit", "relative", "/a/b", "/a/c", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Relative(_)));
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!(Cli::try_parse_from(["fskit", "hash", ".", "--algorithm", "md5"]).is_err());
    }
}
