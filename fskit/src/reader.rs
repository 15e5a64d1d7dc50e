//! Reading a file line by line from the end.
//!
//! [`ReverseLineReader`] walks a file backwards in fixed-size chunks, so the
//! memory it holds is bounded by one chunk plus the longest line, regardless
//! of file size.
//!
//! # Examples
//!
//! ```no_run
//! use fskit::reader::ReverseLineReader;
//!
//! let reader = ReverseLineReader::open("/var/log/app.log", "\n", 8192)?;
//! for line in reader.take(10) {
//!     println!("{}", line?);
//! }
//! # Ok::<(), fskit::Error>(())
//! ```

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

/// Default delimiter between lines.
pub const DEFAULT_NEWLINE: &str = "\n";

/// Default number of bytes read per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unopened,
    Scanning,
    Exhausted,
}

/// Iterates over the lines of a file, last line first.
///
/// Lines are separated by a literal delimiter of one or more bytes. A file of
/// N delimiter-separated pieces yields exactly N lines; in particular a file
/// ending with the delimiter yields an empty first line. Joining the lines in
/// reverse with the delimiter reproduces the file exactly.
#[derive(Debug)]
pub struct ReverseLineReader {
    path: PathBuf,
    file: File,
    newline: Vec<u8>,
    chunk_size: usize,
    file_size: u64,
    /// Offset of the earliest byte read so far.
    pos: u64,
    /// Unconsumed fragments; the first one may be the tail of a longer line.
    buffer: Vec<Vec<u8>>,
    line_number: Option<usize>,
    state: State,
}

impl ReverseLineReader {
    /// Open `path` for reverse reading.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty `newline` or a zero
    /// `chunk_size`, and an I/O error if the file cannot be opened or stat'd.
    pub fn open(path: impl AsRef<Path>, newline: &str, chunk_size: usize) -> Result<Self> {
        if newline.is_empty() {
            return Err(Error::Validation {
                field: "newline".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if chunk_size == 0 {
            return Err(Error::Validation {
                field: "chunk_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
        let file_size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            newline: newline.as_bytes().to_vec(),
            chunk_size,
            file_size,
            pos: file_size,
            buffer: Vec::new(),
            line_number: None,
            state: State::Unopened,
        })
    }

    /// Open `path` with the delimiter and chunk size from `config`.
    ///
    /// # Errors
    ///
    /// See [`ReverseLineReader::open`].
    pub fn from_config(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        Self::open(path, config.newline(), config.chunk_size())
    }

    /// Start over from the end of the file.
    pub fn rewind(&mut self) {
        self.state = State::Unopened;
        self.buffer.clear();
        self.line_number = None;
        self.pos = self.file_size;
    }

    /// Index of the most recently returned line; the last line of the file
    /// is 0. `None` before the first line has been read.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    /// The file being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The next line as raw bytes, without UTF-8 validation.
    pub fn next_line_bytes(&mut self) -> Option<Result<Vec<u8>>> {
        match self.advance() {
            Ok(Some(line)) => {
                self.line_number = Some(self.line_number.map_or(0, |n| n + 1));
                Some(Ok(line))
            }
            Ok(None) => None,
            Err(e) => {
                self.state = State::Exhausted;
                self.buffer.clear();
                Some(Err(e))
            }
        }
    }

    fn advance(&mut self) -> Result<Option<Vec<u8>>> {
        match self.state {
            State::Exhausted => return Ok(None),
            State::Unopened => {
                if self.file_size == 0 {
                    self.state = State::Exhausted;
                    return Ok(None);
                }
                self.state = State::Scanning;
                let first = match self.file_size % self.chunk_size as u64 {
                    0 => self.chunk_size,
                    rem => usize::try_from(rem).unwrap_or(self.chunk_size),
                };
                let chunk = self.read_preceding(first)?;
                self.buffer = self.resolve(chunk);
            }
            State::Scanning => {}
        }

        while self.pos > 0 && self.buffer.len() < 2 {
            let mut chunk = self.read_preceding(self.chunk_size)?;
            if let Some(head) = self.buffer.pop() {
                chunk.extend_from_slice(&head);
            }
            self.buffer = self.resolve(chunk);
        }

        let line = self.buffer.pop();
        if line.is_none() {
            self.state = State::Exhausted;
        }
        Ok(line)
    }

    /// Split freshly read bytes into fragments whose boundaries are final.
    ///
    /// A delimiter that overlaps itself (`---`, `aa`) can match at different
    /// offsets depending on where scanning starts, so only matches after a
    /// point that no occurrence straddles are trusted. Everything before the
    /// first trusted match stays in the head fragment.
    fn resolve(&self, bytes: Vec<u8>) -> Vec<Vec<u8>> {
        let Some(start) = sync_point(&bytes, &self.newline, self.pos == 0) else {
            return vec![bytes];
        };
        let mut fragments = split_on(&bytes[start..], &self.newline);
        let mut head = bytes[..start].to_vec();
        head.append(&mut fragments[0]);
        fragments[0] = head;
        fragments
    }

    /// Read `size` bytes ending at the cursor and move the cursor back.
    fn read_preceding(&mut self, size: usize) -> Result<Vec<u8>> {
        let size = size.min(usize::try_from(self.pos).unwrap_or(usize::MAX));
        self.pos -= size as u64;
        self.file.seek(SeekFrom::Start(self.pos))?;
        let mut chunk = vec![0; size];
        self.file.read_exact(&mut chunk)?;
        Ok(chunk)
    }
}

impl Iterator for ReverseLineReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = match self.next_line_bytes()? {
            Ok(bytes) => bytes,
            Err(e) => return Some(Err(e)),
        };
        Some(String::from_utf8(bytes).map_err(|source| Error::InvalidEncoding {
            path: self.path.clone(),
            source,
        }))
    }
}

/// First offset in `bytes` that no occurrence of `delimiter` straddles.
///
/// Forward matching from such an offset agrees with matching from the start
/// of the file. Occurrences that would run past the end of `bytes` are
/// unknown and count as straddling.
fn sync_point(bytes: &[u8], delimiter: &[u8], at_file_start: bool) -> Option<usize> {
    if at_file_start {
        return Some(0);
    }
    let n = delimiter.len();
    (n - 1..bytes.len()).find(|&p| {
        (p + 1 - n..p).all(|s| s + n <= bytes.len() && &bytes[s..s + n] != delimiter)
    })
}

/// Split `haystack` on every occurrence of `delimiter`, keeping empty pieces.
fn split_on(haystack: &[u8], delimiter: &[u8]) -> Vec<Vec<u8>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + delimiter.len() <= haystack.len() {
        if &haystack[i..i + delimiter.len()] == delimiter {
            pieces.push(haystack[start..i].to_vec());
            i += delimiter.len();
            start = i;
        } else {
            i += 1;
        }
    }
    pieces.push(haystack[start..].to_vec());
    pieces
}
