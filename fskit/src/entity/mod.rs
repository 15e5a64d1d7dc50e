//! Filesystem entity wrappers.
//!
//! An entity is a thin handle around a path string. It never caches existence
//! or metadata; every query goes to the filesystem at the time it is made.
//!
//! - [`FileEntity`]: a regular file
//! - [`DirEntity`]: a directory
//! - [`Entity`]: either of the two, chosen by inspecting the filesystem
//!
//! All three implement [`FsEntity`], which carries the shared path helpers
//! and the priority-ordered [`FsEntity::test`].
//!
//! # Examples
//!
//! ```no_run
//! use fskit::entity::{DirEntity, FsEntity, TestFlags};
//!
//! let dir = DirEntity::new("/var/log");
//! dir.test(TestFlags::EXISTS | TestFlags::READABLE)?;
//! for entity in dir.list()? {
//!     println!("{}", entity.path());
//! }
//! # Ok::<(), fskit::Error>(())
//! ```

mod dir;
mod file;
mod flags;

pub use dir::DirEntity;
pub use file::{FileEntity, DEFAULT_MAX_MEMORY};
pub use flags::TestFlags;

use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::path::{self as lexical, relative_path};

/// Behaviour shared by every filesystem entity.
pub trait FsEntity {
    /// The path exactly as the entity was constructed with.
    fn path(&self) -> &str;

    /// Check type and permission predicates, in the order exists, file,
    /// directory, readable, writable, executable.
    ///
    /// File entities always include [`TestFlags::FILE`] and directory
    /// entities always include [`TestFlags::DIR`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntityTest`](crate::Error::EntityTest) naming the
    /// first predicate that does not hold.
    fn test(&self, flags: TestFlags) -> Result<()>;

    /// Whether the entity could be written, creating missing parents if
    /// needed.
    fn can_write(&self) -> bool;

    /// Create whatever is missing so the entity can be written.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing entity is not writable or a missing
    /// directory cannot be created.
    fn prepare_write(&self) -> Result<()>;

    /// Delete the entity (directories recursively).
    ///
    /// # Errors
    ///
    /// Returns the first failure encountered.
    fn remove(&self) -> Result<()>;

    /// Whether anything exists at the path (symlinks are followed).
    fn exists(&self) -> bool {
        Path::new(self.path()).exists()
    }

    /// Whether the path starts with `/`.
    fn is_absolute(&self) -> bool {
        lexical::is_absolute(self.path())
    }

    /// The directory component of the path.
    fn dirname(&self) -> String {
        lexical::dirname(self.path())
    }

    /// The final component of the path.
    fn basename(&self) -> &str {
        lexical::basename(self.path())
    }

    /// The containing directory, or `None` for `/` and for bare names.
    fn parent(&self) -> Option<DirEntity> {
        if self.path() == "/" {
            return None;
        }
        let dirname = self.dirname();
        (dirname != ".").then(|| DirEntity::new(dirname))
    }

    /// The path with dot segments and duplicate separators removed.
    ///
    /// # Errors
    ///
    /// See [`crate::path::normalize`].
    fn normalized(&self) -> Result<String> {
        lexical::normalize(self.path())
    }

    /// The path resolved against `base_dir` when relative.
    ///
    /// # Errors
    ///
    /// See [`crate::path::normalize_to`].
    fn normalized_to(&self, base_dir: &str) -> Result<String> {
        lexical::normalize_to(self.path(), base_dir)
    }

    /// The relative path from this entity to `to`.
    fn relative_path_to(&self, to: &str) -> String {
        relative_path(self.path(), to)
    }
}

/// A file or a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A regular file (or anything that is not a directory).
    File(FileEntity),
    /// A directory.
    Dir(DirEntity),
}

impl Entity {
    /// Wrap `path` as a directory if one exists there, otherwise as a file.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        if Path::new(&path).is_dir() {
            Self::Dir(DirEntity::new(path))
        } else {
            Self::File(FileEntity::new(path))
        }
    }

    /// Whether this is a [`Entity::File`].
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Whether this is a [`Entity::Dir`].
    #[must_use]
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Dir(_))
    }

    /// The file entity, if this is one.
    #[must_use]
    pub fn as_file(&self) -> Option<&FileEntity> {
        match self {
            Self::File(file) => Some(file),
            Self::Dir(_) => None,
        }
    }

    /// The directory entity, if this is one.
    #[must_use]
    pub fn as_dir(&self) -> Option<&DirEntity> {
        match self {
            Self::Dir(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    fn inner(&self) -> &dyn FsEntity {
        match self {
            Self::File(file) => file,
            Self::Dir(dir) => dir,
        }
    }
}

impl FsEntity for Entity {
    fn path(&self) -> &str {
        self.inner().path()
    }

    fn test(&self, flags: TestFlags) -> Result<()> {
        self.inner().test(flags)
    }

    fn can_write(&self) -> bool {
        self.inner().can_write()
    }

    fn prepare_write(&self) -> Result<()> {
        self.inner().prepare_write()
    }

    fn remove(&self) -> Result<()> {
        self.inner().remove()
    }
}

impl From<FileEntity> for Entity {
    fn from(file: FileEntity) -> Self {
        Self::File(file)
    }
}

impl From<DirEntity> for Entity {
    fn from(dir: DirEntity) -> Self {
        Self::Dir(dir)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
