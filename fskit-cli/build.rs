//! Build script for fskit-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("fskit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Filesystem toolkit")
        .long_about(
            "Command-line front end for path normalization, reverse file reading, \
             directory hashing and temp entity creation",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Load configuration from this file as well")
                .value_name("PATH")
                .global(true)
                .env("FSKIT_CONFIG"),
        )
        .subcommands(vec![
            Command::new("normalize")
                .about("Lexically normalize a path")
                .long_about("Remove dot segments and duplicate separators without touching the filesystem"),
            Command::new("relative")
                .about("Compute the relative path between two paths")
                .long_about("Print the path that leads from FROM to TO"),
            Command::new("reverse")
                .about("Print a file's lines, last line first")
                .long_about("Read a file backwards in fixed-size chunks and print each line"),
            Command::new("hash")
                .about("Hash the contents of a directory tree")
                .long_about("Digest every file below a directory into one order-independent hash"),
            Command::new("check")
                .about("Test a path for existence, type and permissions")
                .long_about("Exit with status 1 naming the first check that does not hold"),
            Command::new("size")
                .about("Print a file's size")
                .long_about("Print a file's size in bytes or human-readable units"),
            Command::new("mktemp")
                .about("Create a uniquely named temp file or directory")
                .long_about("Create a temp file or directory with a random suffix and print its path"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("fskit.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
