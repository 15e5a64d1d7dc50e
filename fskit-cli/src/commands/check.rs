//! Command to test a path.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use fskit::{Entity, FsEntity, TestFlags};

/// Test a path, failing with exit code 1 on the first check that does not
/// hold.
///
/// Checks run in the order exists, file, dir, readable, writable,
/// executable. With no flags only existence is checked.
#[derive(Args)]
pub struct CheckCommand {
    /// Path to test
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Path must exist
    #[arg(long)]
    pub exists: bool,

    /// Path must be a regular file
    #[arg(long)]
    pub file: bool,

    /// Path must be a directory
    #[arg(long)]
    pub dir: bool,

    /// Path must be readable
    #[arg(long)]
    pub readable: bool,

    /// Path must be writable
    #[arg(long)]
    pub writable: bool,

    /// Path must be executable
    #[arg(long)]
    pub executable: bool,
}

impl CheckCommand {
    fn flags(&self) -> TestFlags {
        let mut flags = TestFlags::NONE;
        for (set, flag) in [
            (self.exists, TestFlags::EXISTS),
            (self.file, TestFlags::FILE),
            (self.dir, TestFlags::DIR),
            (self.readable, TestFlags::READABLE),
            (self.writable, TestFlags::WRITABLE),
            (self.executable, TestFlags::EXECUTABLE),
        ] {
            if set {
                flags |= flag;
            }
        }
        if flags.is_empty() {
            TestFlags::EXISTS
        } else {
            flags
        }
    }

    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let entity = Entity::from_path(self.path.clone());
        entity
            .test(self.flags())
            .map_err(|e| CliError::SemanticFailure(format!("Check failed: {e}")))?;

        if global.verbose {
            eprintln!("{entity}: ok");
        }
        Ok(())
    }
}
