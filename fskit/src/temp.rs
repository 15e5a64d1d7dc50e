//! Temporary files and directories that are removed at shutdown.
//!
//! A [`TempRegistry`] creates uniquely named entities under a base directory
//! and remembers them. [`TempRegistry::drain_and_cleanup`] removes everything
//! it remembers; if the host never calls it, the registry sweeps itself when
//! dropped. Share one registry between call sites with an `Arc`.
//!
//! # Examples
//!
//! ```no_run
//! use fskit::entity::FsEntity;
//! use fskit::temp::{TempRegistry, DEFAULT_MAX_ATTEMPTS};
//!
//! let registry = TempRegistry::new();
//! let scratch = registry.create_dir("build", DEFAULT_MAX_ATTEMPTS)?;
//! let out = registry.create_file("report.json", DEFAULT_MAX_ATTEMPTS)?;
//! println!("{} {}", scratch.path(), out.path());
//!
//! assert!(registry.cleanup());
//! # Ok::<(), fskit::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{DirBuilder, OpenOptions};
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use uuid::Uuid;

use crate::config::Config;
use crate::entity::{DirEntity, Entity, FileEntity, FsEntity, TestFlags};
use crate::error::{Error, Result};
use crate::util::sanitize_name;

/// Attempts made by the create methods when the caller has no preference.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Prefix used when the caller does not supply one.
pub const DEFAULT_PREFIX: &str = "tmp";

const TOKEN_LEN: usize = 10;

/// Source of the random part of temp names.
pub trait NameGenerator: Send + Sync {
    /// A fresh token, safe to embed in a file name.
    fn token(&self) -> String;
}

/// Tokens made of the first ten hex digits of a v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNameGenerator;

impl NameGenerator for UuidNameGenerator {
    fn token(&self) -> String {
        let mut token = Uuid::new_v4().simple().to_string();
        token.truncate(TOKEN_LEN);
        token
    }
}

/// Outcome of one cleanup sweep.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Paths that were removed.
    pub removed: Vec<String>,
    /// Paths that could not be removed, with the reason.
    pub failures: Vec<(String, Error)>,
}

impl CleanupReport {
    /// Whether every registered entity was removed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    base_dir: Option<String>,
    entities: BTreeMap<String, Entity>,
}

/// Creates temp entities and removes them again.
pub struct TempRegistry {
    state: Mutex<RegistryState>,
    armed: Once,
    names: Box<dyn NameGenerator>,
    max_attempts: u32,
}

impl TempRegistry {
    /// A registry using the platform temp directory and UUID tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::with_name_generator(UuidNameGenerator)
    }

    /// A registry drawing tokens from `names`.
    pub fn with_name_generator(names: impl NameGenerator + 'static) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            armed: Once::new(),
            names: Box::new(names),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// A registry using the temp directory and attempt budget from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configured temp directory is unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::new();
        registry.max_attempts = config.temp_max_attempts();
        if let Some(dir) = config.temp_dir.as_deref() {
            registry.set_base_dir(Some(dir))?;
        }
        Ok(registry)
    }

    /// The attempt budget taken from configuration.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Override the base directory, or go back to the platform default with
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTempDir`] unless `dir` is a readable and
    /// writable directory.
    pub fn set_base_dir(&self, dir: Option<&str>) -> Result<()> {
        if let Some(dir) = dir {
            DirEntity::new(dir)
                .test(TestFlags::READABLE | TestFlags::WRITABLE)
                .map_err(|e| Error::InvalidTempDir {
                    path: dir.into(),
                    reason: e.to_string(),
                })?;
        }
        self.lock().base_dir = dir.map(|d| d.trim_end_matches('/').to_string());
        Ok(())
    }

    /// The override directory if set, else the platform temp directory.
    #[must_use]
    pub fn base_dir(&self) -> String {
        if let Some(dir) = &self.lock().base_dir {
            return dir.clone();
        }
        let system = std::env::temp_dir();
        let system = system.to_string_lossy();
        match system.trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        }
    }

    /// Create and register a directory named `prefix-<token>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TempNameExhausted`] after `max_attempts` failed
    /// creates.
    pub fn create_dir(&self, prefix: &str, max_attempts: u32) -> Result<DirEntity> {
        let base = self.base_dir();
        let prefix = sanitize_name(prefix);
        let path = Self::attempt(&prefix, max_attempts, || {
            let candidate = format!("{base}/{prefix}-{}", self.names.token());
            DirBuilder::new().create(&candidate).map(|()| candidate)
        })?;

        let dir = DirEntity::new(path);
        self.register(dir.clone());
        Ok(dir)
    }

    /// Create and register an empty file named `stem-<token>.ext`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TempNameExhausted`] after `max_attempts` failed
    /// creates. An existing file at a candidate path counts as a failure.
    pub fn create_file(&self, name: &str, max_attempts: u32) -> Result<FileEntity> {
        let base = self.base_dir();
        let name = sanitize_name(name);
        let (stem, extension) = name.rfind('.').map_or((name.as_str(), ""), |i| name.split_at(i));
        let path = Self::attempt(&name, max_attempts, || {
            let candidate = format!("{base}/{stem}-{}{extension}", self.names.token());
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .map(|_| candidate)
        })?;

        let file = FileEntity::new(path);
        self.register(file.clone());
        Ok(file)
    }

    fn attempt<F>(label: &str, max_attempts: u32, mut create: F) -> Result<String>
    where
        F: FnMut() -> std::io::Result<String>,
    {
        let mut last_error = None;
        for attempt in 1..=max_attempts {
            match create() {
                Ok(path) => {
                    log::debug!("created temp entity {path} on attempt {attempt}");
                    return Ok(path);
                }
                Err(e) => {
                    log::debug!("temp attempt {attempt}/{max_attempts} for '{label}' failed: {e}");
                    last_error = Some(e);
                }
            }
        }
        Err(Error::TempNameExhausted {
            prefix: label.to_string(),
            attempts: max_attempts,
            source: last_error,
        })
    }

    /// Track `entity` for removal, replacing any entry at the same path.
    pub fn register(&self, entity: impl Into<Entity>) {
        let entity = entity.into();
        self.armed.call_once(|| log::debug!("temp registry armed"));
        self.lock().entities.insert(entity.path().to_string(), entity);
    }

    /// Stop tracking `path` without removing it.
    pub fn unregister(&self, path: &str) -> Option<Entity> {
        self.lock().entities.remove(path)
    }

    /// Whether `path` is tracked.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.lock().entities.contains_key(path)
    }

    /// Number of tracked entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entities.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entities.is_empty()
    }

    /// Remove every tracked entity and forget them all.
    ///
    /// A failure on one entity does not stop the sweep.
    pub fn drain_and_cleanup(&self) -> CleanupReport {
        let entities = std::mem::take(&mut self.lock().entities);
        let mut report = CleanupReport::default();
        for (path, entity) in entities {
            match entity.remove() {
                Ok(()) => report.removed.push(path),
                Err(e) => {
                    log::warn!("failed to remove temp entity {path}: {e}");
                    report.failures.push((path, e));
                }
            }
        }
        report
    }

    /// [`TempRegistry::drain_and_cleanup`], reduced to whether it fully
    /// succeeded.
    pub fn cleanup(&self) -> bool {
        self.drain_and_cleanup().is_success()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TempRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempRegistry {
    fn drop(&mut self) {
        if self.armed.is_completed() && !self.is_empty() {
            let report = self.drain_and_cleanup();
            log::debug!(
                "temp registry swept {} entities at drop ({} failures)",
                report.removed.len(),
                report.failures.len()
            );
        }
    }
}

impl fmt::Debug for TempRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("TempRegistry")
            .field("base_dir", &state.base_dir)
            .field("entities", &state.entities.keys().collect::<Vec<_>>())
            .field("armed", &self.armed.is_completed())
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}
