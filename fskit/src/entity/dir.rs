//! Directory entities.

use std::fmt;
use std::fs::{self, DirBuilder};
use std::path::Path;

use crate::entity::{Entity, FileEntity, FsEntity, TestFlags};
use crate::error::{Error, Result};
use crate::path::dirname;

/// Mode used for directories created by [`DirEntity::prepare_write`].
#[cfg(unix)]
const CREATE_MODE: u32 = 0o775;

/// A handle to a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirEntity {
    path: String,
}

impl DirEntity {
    /// Wrap a path. Nothing is checked until an operation runs.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// A file entity for `name` inside this directory.
    #[must_use]
    pub fn file(&self, name: &str) -> FileEntity {
        FileEntity::new(self.child_path(name))
    }

    /// A directory entity for `name` inside this directory.
    #[must_use]
    pub fn dir(&self, name: &str) -> DirEntity {
        DirEntity::new(self.child_path(name))
    }

    /// Whether the directory has no children.
    ///
    /// # Errors
    ///
    /// Fails if the directory does not exist or cannot be listed.
    pub fn is_empty(&self) -> Result<bool> {
        self.test(TestFlags::EXISTS | TestFlags::READABLE)?;
        let mut entries = fs::read_dir(&self.path).map_err(|e| self.io_error(e))?;
        Ok(entries.next().is_none())
    }

    /// Names of the immediate children, sorted.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be listed or a name is not UTF-8.
    pub fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(|e| self.io_error(e))? {
            let name = entry?.file_name();
            let name = name.into_string().map_err(|raw| Error::InvalidPath {
                path: Path::new(&self.path).join(raw),
                reason: "file name is not valid UTF-8".to_string(),
            })?;
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    /// The immediate children as entities, sorted by name.
    ///
    /// Symlinks are listed as file entities so that removing a listing never
    /// reaches through a link.
    ///
    /// # Errors
    ///
    /// See [`DirEntity::list_names`].
    pub fn list(&self) -> Result<Vec<Entity>> {
        self.list_names()?
            .into_iter()
            .map(|name| {
                let path = self.child_path(&name);
                let is_real_dir = fs::symlink_metadata(&path)
                    .map(|meta| meta.is_dir())
                    .map_err(|e| Error::from_io(Path::new(&path), e))?;
                Ok(if is_real_dir {
                    Entity::Dir(DirEntity::new(path))
                } else {
                    Entity::File(FileEntity::new(path))
                })
            })
            .collect()
    }

    /// Every descendant, depth first, each directory before its contents.
    ///
    /// Symlinked directories are listed but not descended into.
    ///
    /// # Errors
    ///
    /// See [`DirEntity::list_names`].
    pub fn list_recursive(&self) -> Result<Vec<Entity>> {
        let mut out = Vec::new();
        self.collect_recursive(&mut out)?;
        Ok(out)
    }

    fn collect_recursive(&self, out: &mut Vec<Entity>) -> Result<()> {
        for entity in self.list()? {
            let sub = entity.as_dir().cloned();
            out.push(entity);
            if let Some(dir) = sub {
                dir.collect_recursive(out)?;
            }
        }
        Ok(())
    }

    fn child_path(&self, name: &str) -> String {
        if self.path.ends_with('/') {
            format!("{}{name}", self.path)
        } else {
            format!("{}/{name}", self.path)
        }
    }

    fn io_error(&self, err: std::io::Error) -> Error {
        Error::from_io(Path::new(&self.path), err)
    }
}

impl FsEntity for DirEntity {
    fn path(&self) -> &str {
        &self.path
    }

    fn test(&self, flags: TestFlags) -> Result<()> {
        super::flags::check(&self.path, flags | TestFlags::DIR)
    }

    /// Walks up to the nearest existing ancestor and checks that it is a
    /// writable directory.
    fn can_write(&self) -> bool {
        let mut path = self.path.clone();
        while !Path::new(&path).exists() {
            let parent = dirname(&path);
            if parent == path {
                return false;
            }
            path = parent;
        }
        DirEntity::new(path).test(TestFlags::WRITABLE).is_ok()
    }

    fn prepare_write(&self) -> Result<()> {
        if self.exists() {
            return self.test(TestFlags::WRITABLE);
        }
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(CREATE_MODE);
        }
        log::debug!("creating directory {}", self.path);
        builder.create(&self.path).map_err(|e| self.io_error(e))
    }

    /// Removes the contents depth first, stopping at the first failure.
    fn remove(&self) -> Result<()> {
        self.test(TestFlags::EXISTS | TestFlags::READABLE | TestFlags::WRITABLE)?;
        for entity in self.list()? {
            entity.remove()?;
        }
        fs::remove_dir(&self.path).map_err(|e| self.io_error(e))
    }
}

impl fmt::Display for DirEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
