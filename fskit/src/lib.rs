#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # fskit
//!
//! Object-oriented wrappers over filesystem primitives.
//!
//! ## Core Types
//!
//! - [`FileEntity`], [`DirEntity`] and [`Entity`]: path wrappers with
//!   existence and permission tests, reading, writing and listing
//! - [`path`]: lexical normalization and relative-path computation
//! - [`ReverseLineReader`]: bounded-memory last-line-first file reading
//! - [`DirectoryHasher`]: deterministic recursive directory content hashing
//! - [`TempRegistry`]: unique temp files and directories removed on cleanup
//! - [`Locator`]: filtered directory searches
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use fskit::path::{normalize, relative_path};
//!
//! assert_eq!(normalize("/usr/./local/../bin/").unwrap(), "/usr/bin");
//! assert_eq!(relative_path("/a/b/c", "/x/y"), "../../x/y");
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod hasher;
pub mod locator;
pub mod logging;
pub mod path;
pub mod reader;
pub mod temp;
pub mod util;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use entity::{DirEntity, Entity, FileEntity, FsEntity, TestFlags};
pub use error::{Error, Result};
pub use hasher::{DigestAlgorithm, DirectoryHasher};
pub use locator::Locator;
pub use logging::{init_logger, LogLevel, Logger};
pub use reader::ReverseLineReader;
pub use temp::{CleanupReport, TempRegistry};
pub use util::{format_size, sanitize_name};
