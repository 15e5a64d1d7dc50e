//! Regular file entities.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::entity::{DirEntity, FsEntity, TestFlags};
use crate::error::{Error, Result};
use crate::reader::ReverseLineReader;
use crate::util::format_size;

/// Files larger than this are prepended to in place rather than in memory.
pub const DEFAULT_MAX_MEMORY: u64 = 8096;

const LINE_COUNT_BUFFER: usize = 8192;

/// A handle to a regular file.
///
/// # Examples
///
/// ```no_run
/// use fskit::entity::FileEntity;
///
/// let log = FileEntity::new("/tmp/fskit-demo/app.log");
/// log.write(b"first\n")?;
/// log.append(b"second\n")?;
/// assert_eq!(log.line_count()?, 2);
/// # Ok::<(), fskit::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntity {
    path: String,
}

impl FileEntity {
    /// Wrap a path. Nothing is checked until an operation runs.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The directory holding this file, if the path names one.
    #[must_use]
    pub fn dir(&self) -> Option<DirEntity> {
        self.parent()
    }

    /// The text after the last `.` of the file name.
    ///
    /// A name whose only dot is its first character (`.bashrc`) has no
    /// extension.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.split_name().1
    }

    /// Case-insensitive extension comparison.
    #[must_use]
    pub fn has_extension(&self, extension: &str) -> bool {
        self.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Split the file name into stem and extension.
    ///
    /// ```
    /// use fskit::entity::FileEntity;
    ///
    /// assert_eq!(FileEntity::new("/path/to/file.tar.gz").split_name(), ("file.tar", Some("gz")));
    /// assert_eq!(FileEntity::new("/path/.hidden").split_name(), (".hidden", None));
    /// ```
    #[must_use]
    pub fn split_name(&self) -> (&str, Option<&str>) {
        split_extension(self.basename())
    }

    /// Size of the file in bytes.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or cannot be read.
    pub fn byte_size(&self) -> Result<u64> {
        self.test(TestFlags::READABLE)?;
        let meta = fs::metadata(&self.path).map_err(|e| self.io_error(e))?;
        Ok(meta.len())
    }

    /// Size of the file formatted with [`format_size`].
    ///
    /// # Errors
    ///
    /// See [`FileEntity::byte_size`].
    pub fn formatted_size(&self, precision: usize) -> Result<String> {
        Ok(format_size(self.byte_size()?, precision))
    }

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist, is not readable, or the read fails.
    pub fn read(&self) -> Result<Vec<u8>> {
        self.read_from(0)
    }

    /// Read the file starting at byte `offset`.
    ///
    /// # Errors
    ///
    /// See [`FileEntity::read`].
    pub fn read_from(&self, offset: u64) -> Result<Vec<u8>> {
        self.test(TestFlags::EXISTS | TestFlags::READABLE)?;
        let mut file = fs::File::open(&self.path).map_err(|e| self.io_error(e))?;
        if offset > 0 {
            file.seek(SeekFrom::Start(offset))?;
        }
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Read the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// As [`FileEntity::read`], plus [`Error::InvalidEncoding`].
    pub fn read_to_string(&self) -> Result<String> {
        String::from_utf8(self.read()?).map_err(|source| Error::InvalidEncoding {
            path: self.path.clone().into(),
            source,
        })
    }

    /// Replace the file contents, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be prepared or written.
    pub fn write(&self, contents: &[u8]) -> Result<()> {
        self.prepare_write()?;
        fs::write(&self.path, contents).map_err(|e| self.io_error(e))
    }

    /// Append to the file, creating it and missing parents if needed.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be prepared or written.
    pub fn append(&self, contents: &[u8]) -> Result<()> {
        self.prepare_write()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(contents)?;
        Ok(())
    }

    /// Insert `contents` at the start of an existing file.
    ///
    /// When the resulting file would exceed `max_memory` bytes the existing
    /// data is shifted forward block by block instead of being loaded whole.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or is not both readable and writable.
    pub fn prepend(&self, contents: &[u8], max_memory: u64) -> Result<()> {
        self.test(TestFlags::EXISTS | TestFlags::READABLE | TestFlags::WRITABLE)?;
        if contents.is_empty() {
            return Ok(());
        }

        let size = fs::metadata(&self.path).map_err(|e| self.io_error(e))?.len();
        let end_size = size + contents.len() as u64;
        if end_size > max_memory {
            log::debug!("prepending {} bytes in place to {}", contents.len(), self.path);
            return self.prepend_in_place(contents, end_size);
        }

        let mut joined = contents.to_vec();
        joined.extend(self.read()?);
        fs::write(&self.path, joined).map_err(|e| self.io_error(e))
    }

    /// Shift the file forward one block of `contents.len()` bytes at a time,
    /// writing the carried block and picking up the block it displaces.
    fn prepend_in_place(&self, contents: &[u8], end_size: u64) -> Result<()> {
        let block = contents.len() as u64;
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let mut carried = contents.to_vec();
        let mut offset = 0;
        while offset < end_size {
            file.seek(SeekFrom::Start(offset))?;
            let mut displaced = Vec::with_capacity(carried.len());
            (&mut file).take(block).read_to_end(&mut displaced)?;

            file.seek(SeekFrom::Start(offset))?;
            file.write_all(&carried)?;

            carried = displaced;
            offset += block;
        }
        Ok(())
    }

    /// Number of `\n` bytes in the file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or read.
    pub fn line_count(&self) -> Result<usize> {
        let file = fs::File::open(&self.path).map_err(|e| self.io_error(e))?;
        let mut reader = BufReader::new(file);
        let mut buffer = [0u8; LINE_COUNT_BUFFER];
        let mut count = 0;
        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                return Ok(count);
            }
            count += buffer[..read].iter().filter(|&&b| b == b'\n').count();
        }
    }

    /// Open a [`ReverseLineReader`] over this file.
    ///
    /// # Errors
    ///
    /// See [`ReverseLineReader::open`].
    pub fn reverse_lines(&self, newline: &str, chunk_size: usize) -> Result<ReverseLineReader> {
        ReverseLineReader::open(&self.path, newline, chunk_size)
    }

    fn io_error(&self, err: std::io::Error) -> Error {
        Error::from_io(Path::new(&self.path), err)
    }
}

impl FsEntity for FileEntity {
    fn path(&self) -> &str {
        &self.path
    }

    fn test(&self, flags: TestFlags) -> Result<()> {
        super::flags::check(&self.path, flags | TestFlags::FILE)
    }

    fn can_write(&self) -> bool {
        if self.exists() {
            return self.test(TestFlags::WRITABLE).is_ok();
        }
        self.parent()
            .unwrap_or_else(|| DirEntity::new("."))
            .can_write()
    }

    fn prepare_write(&self) -> Result<()> {
        if self.exists() {
            return self.test(TestFlags::WRITABLE);
        }
        match self.parent() {
            Some(dir) => dir.prepare_write(),
            None => Ok(()),
        }
    }

    fn remove(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|e| self.io_error(e))
    }
}

impl fmt::Display for FileEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Split a file name at its last `.`, unless that dot leads the name.
pub(crate) fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        None | Some(0) => (name, None),
        Some(idx) => (&name[..idx], Some(&name[idx + 1..])),
    }
}
