//! Persistence of learned items.
//!
//! The scheduler never touches storage. Callers fetch an item, compute a
//! [`ReviewPatch`] and hand it back through [`ItemStore::apply_patch`].
//! Concurrent writers to the same item are last-write-wins.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::{Error, Result};
use crate::models::{LearnedItem, ReviewPatch};

pub trait ItemStore {
    fn get(&self, id: &str) -> Result<Option<LearnedItem>>;

    fn list(&self) -> Result<Vec<LearnedItem>>;

    /// Inserts or replaces the item stored under `item.id`.
    fn put(&mut self, item: LearnedItem) -> Result<()>;

    fn delete(&mut self, id: &str) -> Result<Option<LearnedItem>>;

    /// Writes the review fields of `patch` onto an existing item.
    fn apply_patch(&mut self, id: &str, patch: &ReviewPatch) -> Result<LearnedItem> {
        let mut item = self
            .get(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        item.review.apply(patch);
        self.put(item.clone())?;
        Ok(item)
    }
}
