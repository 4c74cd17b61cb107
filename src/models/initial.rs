//! First schedule of a newly added item, derived from its 1-5 rating.

use super::review_state::{DAY_MS, now_millis};
use super::{ReviewState, Sm2Scheduler};

impl Sm2Scheduler {
    /// Days until the first review for a rating (5 easiest).
    ///
    /// Missing or out-of-range ratings fall back to the Again interval.
    pub fn rating_to_days(&self, rating: Option<i64>) -> f64 {
        let config = self.config();
        match rating {
            Some(r @ 1..=5) => config.rating_intervals[(r - 1) as usize],
            Some(r) => {
                tracing::debug!(rating = r, "rating out of range, using fallback interval");
                config.again_interval
            }
            None => config.again_interval,
        }
    }

    /// Builds the review state of an item solved at `solved_at` (epoch ms).
    pub fn schedule(&self, rating: Option<i64>, solved_at: i64) -> ReviewState {
        let interval = self.rating_to_days(rating);
        let offset = (interval * DAY_MS as f64).round() as i64;

        ReviewState {
            interval,
            ease_factor: self.config().default_ease,
            repetitions: 0,
            next_review_date: solved_at.saturating_add(offset),
            last_reviewed_date: None,
            initial_rating: rating.filter(|r| (1..=5).contains(r)).map(|r| r as u8),
        }
    }
}

/// Schedules with the default constants. `solved_at` defaults to now.
pub fn schedule(rating: Option<i64>, solved_at: Option<i64>) -> ReviewState {
    Sm2Scheduler::default().schedule(rating, solved_at.unwrap_or_else(now_millis))
}
