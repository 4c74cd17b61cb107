//! SM-2 style review scheduler (Anki flavour, four grades).
//!
//! Each grading event maps `(state, grade, now)` to a [`ReviewPatch`]:
//! - Again: interval back to one day, ease -0.20, streak reset
//! - Hard: interval x1.2 (must grow once past one day), ease -0.15
//! - Good: interval x ease, ease unchanged
//! - Easy: interval x ease x 1.3, ease +0.15
//!
//! The first successful review after creation reuses the interval picked by
//! the initial rating instead of multiplying it again.
//!
//! Ease never drops below the configured minimum (1.3) and intervals never
//! drop below one day.

use super::{Grade, ReviewPatch, ReviewState, review_state::DAY_MS, review_state::now_millis};
use crate::config::SrsConfig;

/// Stateless scheduler carrying the tuning constants.
#[derive(Clone, Debug, Default)]
pub struct Sm2Scheduler {
    config: SrsConfig,
}

impl Sm2Scheduler {
    pub fn new(config: SrsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SrsConfig {
        &self.config
    }

    /// Computes the fields to store after grading `state` at `now` (epoch ms).
    pub fn grade(&self, state: &ReviewState, grade: Grade, now: i64) -> ReviewPatch {
        let config = &self.config;
        let current = state.normalized(config);
        let interval = current.interval;
        let ease = current.ease_factor;
        let repetitions = current.repetitions;

        let (next_interval, next_ease, next_repetitions) = match grade {
            Grade::Again => (
                config.again_interval,
                (ease - config.again_ease_penalty).max(config.min_ease),
                0,
            ),
            Grade::Hard => {
                let mut next = (interval * config.hard_interval_multiplier)
                    .round()
                    .max(config.again_interval);
                // Past the first day a Hard answer must still push the review out.
                if next <= interval && interval > config.again_interval {
                    next = interval + 1.0;
                }
                (
                    next,
                    (ease - config.hard_ease_penalty).max(config.min_ease),
                    repetitions.saturating_add(1),
                )
            }
            Grade::Good => {
                let next = if repetitions == 0 {
                    interval
                } else {
                    (interval + 1.0).max((interval * ease).round())
                };
                (next, ease, repetitions.saturating_add(1))
            }
            Grade::Easy => {
                let next = if repetitions == 0 {
                    (interval + 2.0).max((interval * config.easy_interval_bonus).round())
                } else {
                    (interval + 1.0).max((interval * ease * config.easy_interval_bonus).round())
                };
                (
                    next,
                    ease + config.easy_ease_bonus,
                    repetitions.saturating_add(1),
                )
            }
        };

        let next_interval = next_interval.max(1.0);
        let offset = (next_interval.ceil() as i64).saturating_mul(DAY_MS);
        let next_review_date = now.saturating_add(offset);

        tracing::debug!(
            %grade,
            interval,
            ease,
            repetitions,
            next_interval,
            next_ease,
            next_repetitions,
            next_review_date,
            "review graded"
        );

        ReviewPatch {
            interval: next_interval,
            ease_factor: next_ease,
            repetitions: next_repetitions,
            next_review_date,
            last_reviewed_date: now,
        }
    }

    /// What each of the four grades would produce, in button order.
    pub fn preview(&self, state: &ReviewState, now: i64) -> [(Grade, ReviewPatch); 4] {
        Grade::ALL.map(|grade| (grade, self.grade(state, grade, now)))
    }
}

/// Grades with the default constants. `now` defaults to the current time.
pub fn grade(state: &ReviewState, grade: Grade, now: Option<i64>) -> ReviewPatch {
    Sm2Scheduler::default().grade(state, grade, now.unwrap_or_else(now_millis))
}
