//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `normalize`: Lexically normalize a path
//! - `relative`: Compute the relative path between two paths
//! - `reverse`: Print a file's lines last first
//! - `hash`: Hash the contents of a directory tree
//! - `check`: Test a path for existence, type and permissions
//! - `size`: Print a file's size
//! - `mktemp`: Create a temp file or directory

pub mod check;
pub mod hash;
pub mod mktemp;
pub mod normalize;
pub mod relative;
pub mod reverse;
pub mod size;

pub use check::CheckCommand;
pub use hash::HashCommand;
pub use mktemp::MktempCommand;
pub use normalize::NormalizeCommand;
pub use relative::RelativeCommand;
pub use reverse::ReverseCommand;
pub use size::SizeCommand;
