//! Collecting entities from one or more directory searches.

use std::collections::HashSet;
use std::fmt;

use crate::entity::{DirEntity, Entity, FsEntity, TestFlags};
use crate::error::Result;

type Filter = Box<dyn Fn(&Entity) -> bool + Send + Sync>;

/// Accumulates entities found by [`Locator::search_dir`], in discovery order
/// and without duplicates.
///
/// # Examples
///
/// ```no_run
/// use fskit::entity::Entity;
/// use fskit::locator::Locator;
///
/// let mut locator = Locator::new()
///     .with_filter(|e: &Entity| e.as_file().is_some_and(|f| f.has_extension("rs")));
/// locator.search_dir("src", true)?.search_dir("tests", true)?;
/// for path in locator.paths() {
///     println!("{path}");
/// }
/// # Ok::<(), fskit::Error>(())
/// ```
#[derive(Default)]
pub struct Locator {
    filter: Option<Filter>,
    seen: HashSet<String>,
    entities: Vec<Entity>,
}

impl Locator {
    /// A locator that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep entities for which `filter` returns `true`.
    #[must_use]
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Entity) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Add the children of `dir` (all descendants when `recursive`).
    ///
    /// Entities already found by an earlier search are not added again.
    ///
    /// # Errors
    ///
    /// Fails if `dir` is not an existing, readable directory or a listing
    /// fails part way.
    pub fn search_dir(&mut self, dir: &str, recursive: bool) -> Result<&mut Self> {
        let dir = DirEntity::new(dir);
        dir.test(TestFlags::EXISTS | TestFlags::READABLE)?;
        let found = if recursive { dir.list_recursive()? } else { dir.list()? };

        for entity in found {
            if self.seen.contains(entity.path()) {
                continue;
            }
            if self.filter.as_ref().is_some_and(|keep| !keep(&entity)) {
                continue;
            }
            self.seen.insert(entity.path().to_string());
            self.entities.push(entity);
        }
        Ok(self)
    }

    /// Paths of everything found so far.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.entities.iter().map(FsEntity::path).collect()
    }

    /// Everything found so far.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Consume the locator, returning what it found.
    #[must_use]
    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("filtered", &self.filter.is_some())
            .field("entities", &self.entities)
            .finish_non_exhaustive()
    }
}
