//! Deterministic content hashing of a directory tree.
//!
//! Every regular file below the root is digested and recorded under its
//! lowercased, root-relative path. The sorted map is serialized as pretty
//! JSON and that document is digested again to give a single hash for the
//! whole tree. Two trees with the same relative paths and file contents hash
//! the same no matter the order their files were created in.
//!
//! Entries reached through a symlink (anything whose canonical path differs
//! from the path it was listed under) are skipped, and symlinked directories
//! are not descended into.
//!
//! # Examples
//!
//! ```no_run
//! use fskit::hasher::{DigestAlgorithm, DirectoryHasher};
//!
//! let mut hasher = DirectoryHasher::new("/srv/site")?.with_algorithm(DigestAlgorithm::Sha512);
//! println!("{}", hasher.hash()?);
//! # Ok::<(), fskit::Error>(())
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::config::Config;
use crate::entity::{DirEntity, FsEntity, TestFlags};
use crate::error::{Error, Result};
use crate::path::canonicalize::canonicalize;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// The digest used for file contents and for the combined hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-256 (64 hex characters).
    #[default]
    Sha256,
    /// SHA-512 (128 hex characters).
    Sha512,
}

impl DigestAlgorithm {
    /// Lowercase hex digest of everything `reader` yields.
    ///
    /// # Errors
    ///
    /// Propagates read failures.
    pub fn digest_reader(self, reader: impl Read) -> std::io::Result<String> {
        match self {
            Self::Sha256 => stream_digest::<Sha256>(reader),
            Self::Sha512 => stream_digest::<Sha512>(reader),
        }
    }

    /// Lowercase hex digest of `bytes`.
    #[must_use]
    pub fn digest_bytes(self, bytes: &[u8]) -> String {
        match self {
            Self::Sha256 => format!("{:x}", Sha256::digest(bytes)),
            Self::Sha512 => format!("{:x}", Sha512::digest(bytes)),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
            Self::Sha512 => write!(f, "sha512"),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(Error::Validation {
                field: "hash_algorithm".to_string(),
                message: format!("unknown algorithm '{s}'; expected sha256 or sha512"),
            }),
        }
    }
}

fn stream_digest<D: Digest>(mut reader: impl Read) -> std::io::Result<String>
where
    sha2::digest::Output<D>: fmt::LowerHex,
{
    let mut hasher = D::new();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// One item produced by a [`DirectoryListing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// The directory the entry was found in, as listed.
    pub parent: String,
    /// The entry's own name.
    pub file_name: String,
    /// Whether the entry is (or points at) a regular file.
    pub is_file: bool,
    /// The fully resolved path, or `None` if it cannot be resolved.
    pub canonical: Option<String>,
}

impl ListedEntry {
    /// `parent/file_name`.
    #[must_use]
    pub fn listed_path(&self) -> String {
        join_path(&self.parent, &self.file_name)
    }

    /// Whether the entry is reached through a symlink.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.canonical.as_deref() != Some(self.listed_path().as_str())
    }
}

/// `parent/name` without doubling the separator under `/`.
fn join_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// `root` without trailing separators; the filesystem root stays `/`.
fn trim_root(root: &str) -> &str {
    match root.trim_end_matches('/') {
        "" if root.starts_with('/') => "/",
        trimmed => trimmed,
    }
}

/// Recursive directory listing used by [`DirectoryHasher`].
pub trait DirectoryListing {
    /// Every entry below `root`, directories before their contents.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read.
    fn entries(&self, root: &str) -> Result<Vec<ListedEntry>>;
}

/// [`DirectoryListing`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsListing;

impl FsListing {
    fn walk(dir: &str, out: &mut Vec<ListedEntry>) -> Result<()> {
        let names = DirEntity::new(dir).list_names()?;
        for file_name in names {
            let path = join_path(dir, &file_name);
            let is_file = fs::metadata(&path).is_ok_and(|m| m.is_file());
            let is_real_dir = fs::symlink_metadata(&path).is_ok_and(|m| m.is_dir());
            out.push(ListedEntry {
                parent: dir.to_string(),
                file_name,
                is_file,
                canonical: canonicalize(&path).ok(),
            });
            if is_real_dir {
                Self::walk(&path, out)?;
            }
        }
        Ok(())
    }
}

impl DirectoryListing for FsListing {
    fn entries(&self, root: &str) -> Result<Vec<ListedEntry>> {
        let mut out = Vec::new();
        Self::walk(trim_root(root), &mut out)?;
        Ok(out)
    }
}

/// Hashes the files of one directory tree.
///
/// Results are computed on first use and cached for the lifetime of the
/// hasher.
#[derive(Debug)]
pub struct DirectoryHasher<L = FsListing> {
    root: String,
    algorithm: DigestAlgorithm,
    listing: L,
    hashes: Option<BTreeMap<String, String>>,
}

impl DirectoryHasher<FsListing> {
    /// Prepare to hash `root`.
    ///
    /// # Errors
    ///
    /// Fails if `root` is not an existing, readable directory.
    pub fn new(root: &str) -> Result<Self> {
        Self::with_listing(root, FsListing)
    }

    /// Prepare to hash `root` with the algorithm from `config`.
    ///
    /// # Errors
    ///
    /// See [`DirectoryHasher::new`].
    pub fn from_config(root: &str, config: &Config) -> Result<Self> {
        Ok(Self::new(root)?.with_algorithm(config.hash_algorithm()))
    }
}

impl<L: DirectoryListing> DirectoryHasher<L> {
    /// Prepare to hash `root` using a custom listing.
    ///
    /// # Errors
    ///
    /// Fails if `root` is not an existing, readable directory.
    pub fn with_listing(root: &str, listing: L) -> Result<Self> {
        DirEntity::new(root).test(TestFlags::EXISTS | TestFlags::READABLE)?;
        Ok(Self {
            root: canonicalize(root)?,
            algorithm: DigestAlgorithm::default(),
            listing,
            hashes: None,
        })
    }

    /// Use `algorithm` for file digests and the combined hash.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        if algorithm != self.algorithm {
            self.hashes = None;
        }
        self.algorithm = algorithm;
        self
    }

    /// The canonical root directory.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The digest in use.
    #[must_use]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Lowercased relative path → file digest, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFile`] when two files differ only in case,
    /// and I/O errors from listing or reading.
    pub fn compute_hashes(&mut self) -> Result<&BTreeMap<String, String>> {
        if self.hashes.is_none() {
            self.hashes = Some(self.generate()?);
        }
        Ok(self.hashes.get_or_insert_with(BTreeMap::new))
    }

    /// [`DirectoryHasher::compute_hashes`] as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// See [`DirectoryHasher::compute_hashes`].
    pub fn hashes_json(&mut self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.compute_hashes()?)?)
    }

    /// A single digest for the whole tree.
    ///
    /// # Errors
    ///
    /// See [`DirectoryHasher::compute_hashes`].
    pub fn hash(&mut self) -> Result<String> {
        let json = self.hashes_json()?;
        Ok(self.algorithm.digest_bytes(json.as_bytes()))
    }

    fn generate(&self) -> Result<BTreeMap<String, String>> {
        let mut hashes = BTreeMap::new();
        let mut originals: HashMap<String, String> = HashMap::new();

        for entry in self.listing.entries(&self.root)? {
            if !entry.is_file {
                continue;
            }
            if entry.is_alias() {
                log::debug!("skipping alias {}", entry.listed_path());
                continue;
            }

            let listed = entry.listed_path();
            let relative = listed
                .strip_prefix(&self.root)
                .unwrap_or(&listed)
                .trim_start_matches('/')
                .to_string();
            let key = relative.to_lowercase();
            if let Some(existing) = originals.get(&key) {
                return Err(Error::DuplicateFile {
                    path: relative,
                    existing: existing.clone(),
                });
            }

            let file = File::open(&listed).map_err(|e| Error::from_io(Path::new(&listed), e))?;
            let digest = self.algorithm.digest_reader(file)?;
            hashes.insert(key.clone(), digest);
            originals.insert(key, relative);
        }

        log::debug!("hashed {} files under {}", hashes.len(), self.root);
        Ok(hashes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::{tempdir, TempDir};

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn tree(files: &[(&str, &str)]) -> (TempDir, String) {
        let dir = tempdir().unwrap();
        for (rel, contents) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        let root = dir.path().to_str().unwrap().to_string();
        (dir, root)
    }

    struct FixedListing {
        entries: Vec<ListedEntry>,
        calls: Cell<usize>,
    }

    impl DirectoryListing for FixedListing {
        fn entries(&self, _root: &str) -> Result<Vec<ListedEntry>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.entries.clone())
        }
    }

    fn listed(parent: &str, name: &str, canonical: &str) -> ListedEntry {
        ListedEntry {
            parent: parent.to_string(),
            file_name: name.to_string(),
            is_file: true,
            canonical: Some(canonical.to_string()),
        }
    }

    #[test]
    fn test_entries_under_filesystem_root() {
        assert_eq!(trim_root("/"), "/");
        assert_eq!(trim_root("//"), "/");
        assert_eq!(trim_root("/data/"), "/data");
        assert_eq!(join_path("/", "etc"), "/etc");
        assert_eq!(join_path("/data", "x"), "/data/x");

        let entry = ListedEntry {
            parent: "/".to_string(),
            file_name: "etc".to_string(),
            is_file: false,
            canonical: Some("/etc".to_string()),
        };
        assert_eq!(entry.listed_path(), "/etc");
        assert!(!entry.is_alias());
    }

    #[test]
    fn test_algorithm_parse_and_display() {
        assert_eq!("sha256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("SHA512".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512);
        assert!("md5".parse::<DigestAlgorithm>().is_err());
        assert_eq!(DigestAlgorithm::Sha512.to_string(), "sha512");
    }

    #[test]
    fn test_digest_known_values() {
        assert_eq!(DigestAlgorithm::Sha256.digest_bytes(b""), EMPTY_SHA256);
        assert_eq!(
            DigestAlgorithm::Sha256.digest_reader(&b""[..]).unwrap(),
            EMPTY_SHA256
        );
        assert_eq!(DigestAlgorithm::Sha512.digest_bytes(b"abc").len(), 128);
    }

    #[test]
    fn test_keys_are_relative_and_lowercased() {
        let (_dir, root) = tree(&[("Docs/README.md", "hi"), ("a.txt", "")]);
        let mut hasher = DirectoryHasher::new(&root).unwrap();
        let hashes = hasher.compute_hashes().unwrap();
        let keys: Vec<&str> = hashes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a.txt", "docs/readme.md"]);
        assert_eq!(hashes["a.txt"], EMPTY_SHA256);
    }

    #[test]
    fn test_json_is_sorted_pretty_map() {
        let (_dir, root) = tree(&[("b", ""), ("a", "")]);
        let mut hasher = DirectoryHasher::new(&root).unwrap();
        let json = hasher.hashes_json().unwrap();
        assert_eq!(
            json,
            format!("{{\n  \"a\": \"{EMPTY_SHA256}\",\n  \"b\": \"{EMPTY_SHA256}\"\n}}")
        );
        let expected = DigestAlgorithm::Sha256.digest_bytes(json.as_bytes());
        assert_eq!(hasher.hash().unwrap(), expected);
    }

    #[test]
    fn test_rejects_missing_root() {
        let err = DirectoryHasher::new("/definitely/not/a/dir").unwrap_err();
        assert!(err.to_string().ends_with("does not exist"));
    }

    #[test]
    fn test_alias_entries_are_skipped() {
        let (_dir, root) = tree(&[]);
        let real = canonicalize(&root).unwrap();
        let listing = FixedListing {
            entries: vec![listed(&format!("{real}/path/to"), "name", "/real/path")],
            calls: Cell::new(0),
        };
        let mut hasher = DirectoryHasher::with_listing(&root, listing).unwrap();
        assert!(hasher.compute_hashes().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_entries_fail() {
        let (_dir, root) = tree(&[("a.txt", "x")]);
        let real = canonicalize(&root).unwrap();
        let entry = listed(&real, "a.txt", &format!("{real}/a.txt"));
        let listing = FixedListing {
            entries: vec![entry.clone(), entry],
            calls: Cell::new(0),
        };
        let mut hasher = DirectoryHasher::with_listing(&root, listing).unwrap();
        match hasher.compute_hashes().unwrap_err() {
            Error::DuplicateFile { path, existing } => {
                assert_eq!(path, "a.txt");
                assert_eq!(existing, "a.txt");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_results_are_cached() {
        let (_dir, root) = tree(&[("a.txt", "x")]);
        let real = canonicalize(&root).unwrap();
        let listing = FixedListing {
            entries: vec![listed(&real, "a.txt", &format!("{real}/a.txt"))],
            calls: Cell::new(0),
        };
        let mut hasher = DirectoryHasher::with_listing(&root, listing).unwrap();
        let first = hasher.hash().unwrap();
        let second = hasher.hash().unwrap();
        assert_eq!(first, second);
        assert_eq!(hasher.listing.calls.get(), 1);
    }

    #[test]
    fn test_algorithm_changes_digest_length() {
        let (_dir, root) = tree(&[("a.txt", "x")]);
        let mut sha512 = DirectoryHasher::new(&root)
            .unwrap()
            .with_algorithm(DigestAlgorithm::Sha512);
        assert_eq!(sha512.compute_hashes().unwrap()["a.txt"].len(), 128);
        assert_eq!(sha512.hash().unwrap().len(), 128);
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_listing_skips_symlinks() {
        use std::os::unix::fs::symlink;

        let (_dir, root) = tree(&[("real/file.txt", "data")]);
        symlink(format!("{root}/real/file.txt"), format!("{root}/link.txt")).unwrap();
        symlink(format!("{root}/real"), format!("{root}/linked-dir")).unwrap();

        let mut hasher = DirectoryHasher::new(&root).unwrap();
        let keys: Vec<String> = hasher.compute_hashes().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["real/file.txt"]);
    }
}
