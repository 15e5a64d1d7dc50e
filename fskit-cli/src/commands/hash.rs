//! Command to hash a directory tree.

use crate::error::CliError;
use crate::utils::{load_configuration, print_lines, GlobalOptions};
use clap::Args;
use fskit::hasher::{DigestAlgorithm, DirectoryHasher};

/// Hash the files below a directory into a single digest.
///
/// The result does not depend on the order files were created in. File
/// names differing only in case are rejected.
#[derive(Args)]
pub struct HashCommand {
    /// Directory to hash
    #[arg(value_name = "DIR")]
    pub dir: String,

    /// Print the per-file digests as JSON instead of the combined hash
    #[arg(long)]
    pub list: bool,

    /// Digest algorithm (sha256 or sha512)
    #[arg(long, value_name = "ALGORITHM")]
    pub algorithm: Option<DigestAlgorithm>,
}

impl HashCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let algorithm = self.algorithm.unwrap_or_else(|| config.hash_algorithm());
        let mut hasher = DirectoryHasher::new(&self.dir)?.with_algorithm(algorithm);

        let output = if self.list {
            hasher.hashes_json()?
        } else {
            hasher.hash()?
        };
        print_lines([Ok(output)])
    }
}
