//! Glue between a store and the scheduler, used by the front ends.
//!
//! Every mutating call returns the item as stored afterwards, so callers can
//! re-render from the return value.

use crate::config::SrsConfig;
use crate::database::ItemStore;
use crate::display::format_date;
use crate::error::{Error, Result};
use crate::models::{
    Classification, Grade, LearnedItem, NewItem, ReviewPatch, Sm2Scheduler, classify_with,
    parse_solved_date,
};

pub struct ReviewService<S> {
    store: S,
    scheduler: Sm2Scheduler,
}

impl<S: ItemStore> ReviewService<S> {
    pub fn new(store: S, config: SrsConfig) -> Self {
        Self {
            store,
            scheduler: Sm2Scheduler::new(config),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &Sm2Scheduler {
        &self.scheduler
    }

    /// Schedules a freshly solved item and stores it. Without a solved date
    /// the item counts as solved today.
    ///
    /// Adding a URL that already exists merges the metadata into the stored
    /// item and restarts its schedule.
    pub fn add_item(&mut self, new: NewItem, now: i64) -> Result<LearnedItem> {
        let date_solved = new
            .date_solved
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());
        let solved_at = match date_solved {
            Some(text) => parse_solved_date(text, now)?,
            None => now,
        };
        let date_solved = date_solved.map_or_else(|| format_date(now), str::to_string);

        let review = self.scheduler.schedule(new.rating, solved_at);
        let item = LearnedItem::new(
            NewItem {
                date_solved: Some(date_solved),
                ..new
            },
            review,
        );

        let item = match self.store.get(&item.id)? {
            Some(mut existing) => {
                tracing::info!(id = %item.id, "updating existing item");
                existing.merge_from(item);
                existing
            }
            None => {
                tracing::info!(id = %item.id, title = item.display_title(), "adding item");
                item
            }
        };

        self.store.put(item.clone())?;
        Ok(item)
    }

    pub fn get(&self, id: &str) -> Result<LearnedItem> {
        self.store
            .get(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Grades an item and persists the resulting patch.
    pub fn review(&mut self, id: &str, grade: Grade, now: i64) -> Result<LearnedItem> {
        let item = self.get(id)?;
        let patch = self.scheduler.grade(&item.review, grade, now);
        let updated = self.store.apply_patch(id, &patch)?;

        tracing::info!(
            id,
            %grade,
            interval = updated.review.interval,
            next_review_date = updated.review.next_review_date,
            "item reviewed"
        );
        Ok(updated)
    }

    /// Patches each grade would produce for the item, without storing anything.
    pub fn preview(&self, id: &str, now: i64) -> Result<[(Grade, ReviewPatch); 4]> {
        let item = self.get(id)?;
        Ok(self.scheduler.preview(&item.review, now))
    }

    /// All items split into due and upcoming, using the configured boundary.
    pub fn dashboard(&self, now: i64) -> Result<Classification<LearnedItem>> {
        let items = self.store.list()?;
        Ok(classify_with(
            items,
            now,
            self.scheduler.config().due_boundary,
        ))
    }

    pub fn delete(&mut self, id: &str) -> Result<LearnedItem> {
        let removed = self
            .store
            .delete(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        tracing::info!(id, "item deleted");
        Ok(removed)
    }

    /// Stores already-scheduled items (e.g. from an import), replacing any with the same id.
    pub fn restore(&mut self, items: Vec<LearnedItem>) -> Result<usize> {
        let count = items.len();
        for item in items {
            self.store.put(item)?;
        }
        tracing::info!(count, "items restored");
        Ok(count)
    }
}
