//! Type and permission predicates for entity tests.

use std::fmt;
use std::fs::{self, Metadata};
use std::ops::{BitOr, BitOrAssign};
use std::path::Path;

use crate::error::{Error, Result};

/// A set of predicates to check with [`FsEntity::test`](super::FsEntity::test).
///
/// # Examples
///
/// ```
/// use fskit::entity::TestFlags;
///
/// let flags = TestFlags::EXISTS | TestFlags::READABLE;
/// assert!(flags.contains(TestFlags::READABLE));
/// assert!(!flags.contains(TestFlags::WRITABLE));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TestFlags(u8);

impl TestFlags {
    /// No predicates; always passes.
    pub const NONE: Self = Self(0);
    /// The path exists.
    pub const EXISTS: Self = Self(1);
    /// The path is a directory.
    pub const DIR: Self = Self(1 << 1);
    /// The path is a regular file.
    pub const FILE: Self = Self(1 << 2);
    /// The entity can be opened (files) or listed (directories).
    pub const READABLE: Self = Self(1 << 3);
    /// The entity is not marked read-only.
    pub const WRITABLE: Self = Self(1 << 4);
    /// The entity has an execute bit set.
    pub const EXECUTABLE: Self = Self(1 << 5);

    /// Whether every predicate in `other` is also in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no predicate is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TestFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TestFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for TestFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = CHECKS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "TestFlags({})", names.join(" | "))
    }
}

const CHECKS: [(TestFlags, &str); 6] = [
    (TestFlags::EXISTS, "EXISTS"),
    (TestFlags::FILE, "FILE"),
    (TestFlags::DIR, "DIR"),
    (TestFlags::READABLE, "READABLE"),
    (TestFlags::WRITABLE, "WRITABLE"),
    (TestFlags::EXECUTABLE, "EXECUTABLE"),
];

/// Run the requested predicates against `path` in priority order, failing on
/// the first one that does not hold.
pub(crate) fn check(path: &str, flags: TestFlags) -> Result<()> {
    let meta = fs::metadata(path).ok();
    for (flag, _) in CHECKS {
        if !flags.contains(flag) {
            continue;
        }
        let reason = match flag {
            TestFlags::EXISTS if meta.is_none() => "does not exist",
            TestFlags::FILE if !meta.as_ref().is_some_and(Metadata::is_file) => "is not a file",
            TestFlags::DIR if !meta.as_ref().is_some_and(Metadata::is_dir) => "is not a directory",
            TestFlags::READABLE if !is_readable(path, meta.as_ref()) => "is not readable",
            TestFlags::WRITABLE if !is_writable(meta.as_ref()) => "is not writable",
            TestFlags::EXECUTABLE if !is_executable(meta.as_ref()) => "is not executable",
            _ => continue,
        };
        return Err(Error::EntityTest {
            path: path.into(),
            reason: reason.to_string(),
        });
    }
    Ok(())
}

fn is_readable(path: &str, meta: Option<&Metadata>) -> bool {
    match meta {
        None => false,
        Some(m) if m.is_dir() => fs::read_dir(path).is_ok(),
        Some(_) => fs::File::open(Path::new(path)).is_ok(),
    }
}

fn is_writable(meta: Option<&Metadata>) -> bool {
    meta.is_some_and(|m| !m.permissions().readonly())
}

#[cfg(unix)]
fn is_executable(meta: Option<&Metadata>) -> bool {
    use std::os::unix::fs::PermissionsExt;

    meta.is_some_and(|m| m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(meta: Option<&Metadata>) -> bool {
    meta.is_some_and(Metadata::is_dir)
}
