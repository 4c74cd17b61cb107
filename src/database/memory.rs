//! In-memory store. Everything is lost when it is dropped.

use super::ItemStore;
use crate::error::Result;
use crate::models::LearnedItem;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, LearnedItem>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<LearnedItem>> {
        Ok(self.items.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LearnedItem>> {
        Ok(self.items.values().cloned().collect())
    }

    fn put(&mut self, item: LearnedItem) -> Result<()> {
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<Option<LearnedItem>> {
        Ok(self.items.remove(id))
    }
}
