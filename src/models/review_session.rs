//! Review session over the items that are due when it starts.
//! Each graded item is persisted immediately through the service.

use super::{Grade, LearnedItem};
use crate::database::ItemStore;
use crate::error::Result;
use crate::service::ReviewService;

/// Walks the due items once, in due-date order.
pub struct ReviewSession {
    pub items: Vec<LearnedItem>,
    pub current_index: usize,
    pub show_notes: bool,
    pub again_count: usize,
}

impl ReviewSession {
    /// Starts a session on everything the service reports as due at `now`.
    pub fn start<S: ItemStore>(service: &ReviewService<S>, now: i64) -> Result<Self> {
        let items = service.dashboard(now)?.due;
        Ok(Self::new(items))
    }

    pub fn new(items: Vec<LearnedItem>) -> Self {
        Self {
            items,
            current_index: 0,
            show_notes: false,
            again_count: 0,
        }
    }

    pub fn current(&self) -> Option<&LearnedItem> {
        self.items.get(self.current_index)
    }

    pub fn toggle_notes(&mut self) {
        self.show_notes = !self.show_notes;
    }

    /// Grades the current item, stores the result and moves to the next one.
    pub fn grade_current<S: ItemStore>(
        &mut self,
        service: &mut ReviewService<S>,
        grade: Grade,
        now: i64,
    ) -> Result<Option<LearnedItem>> {
        let Some(item) = self.items.get_mut(self.current_index) else {
            return Ok(None);
        };

        let updated = service.review(&item.id, grade, now)?;
        *item = updated.clone();

        if grade == Grade::Again {
            self.again_count += 1;
        }
        self.current_index += 1;
        self.show_notes = false;

        Ok(Some(updated))
    }

    /// Skips the current item without grading it.
    pub fn skip_current(&mut self) {
        if self.current_index < self.items.len() {
            self.current_index += 1;
            self.show_notes = false;
        }
    }

    pub fn reviewed_count(&self) -> usize {
        self.current_index.min(self.items.len())
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.reviewed_count()
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.items.len()
    }

    pub fn progress_message(&self) -> String {
        if self.is_completed() {
            format!(
                "Session complete: {} reviewed, {} to relearn tomorrow",
                self.reviewed_count(),
                self.again_count
            )
        } else {
            format!(
                "Item {} of {} ({} remaining)",
                self.current_index + 1,
                self.total_count(),
                self.remaining_count()
            )
        }
    }
}
