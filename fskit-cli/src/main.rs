//! Main entry point for the fskit CLI.
//!
//! This is the command-line interface for the fskit filesystem toolkit.
//! It provides commands over the library:
//! - `normalize` / `relative`: Lexical path operations
//! - `reverse`: Read a file backwards
//! - `hash`: Hash a directory tree
//! - `check`: Test a path
//! - `size`: Human-readable file size
//! - `mktemp`: Create a temp entity

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = fskit::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        cli::Command::Normalize(cmd) => cmd.execute(&global),
        cli::Command::Relative(cmd) => cmd.execute(&global),
        cli::Command::Reverse(cmd) => cmd.execute(&global),
        cli::Command::Hash(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Size(cmd) => cmd.execute(&global),
        cli::Command::Mktemp(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            if !global.quiet || e.exit_code() != 1 {
                eprintln!("Error: {e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
