//! Splits scheduled items into "due" and "upcoming".

use super::ReviewState;
use super::review_state::{DAY_MS, now_millis};
use crate::config::DueBoundary;

/// Anything carrying a due instant.
pub trait Scheduled {
    fn next_review_date(&self) -> i64;
}

impl Scheduled for ReviewState {
    fn next_review_date(&self) -> i64 {
        self.next_review_date
    }
}

impl<T: Scheduled> Scheduled for &T {
    fn next_review_date(&self) -> i64 {
        (**self).next_review_date()
    }
}

/// Both halves are sorted by due date; equal dates keep input order.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification<T> {
    pub due: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Classification<T> {
    pub fn len(&self) -> usize {
        self.due.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last instant (inclusive) that still counts as due.
pub fn due_cutoff(now: i64, boundary: DueBoundary) -> i64 {
    match boundary {
        DueBoundary::Now => now,
        DueBoundary::EndOfDay => now
            .div_euclid(DAY_MS)
            .checked_add(1)
            .and_then(|days| days.checked_mul(DAY_MS))
            .map_or(i64::MAX, |next_midnight| next_midnight - 1),
    }
}

pub fn classify_with<T: Scheduled>(
    items: impl IntoIterator<Item = T>,
    now: i64,
    boundary: DueBoundary,
) -> Classification<T> {
    let cutoff = due_cutoff(now, boundary);
    let (mut due, mut upcoming): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| item.next_review_date() <= cutoff);

    due.sort_by_key(|item| item.next_review_date());
    upcoming.sort_by_key(|item| item.next_review_date());

    Classification { due, upcoming }
}

/// Classifies with the default end-of-day boundary. `now` defaults to the current time.
pub fn classify<T: Scheduled>(
    items: impl IntoIterator<Item = T>,
    now: Option<i64>,
) -> Classification<T> {
    classify_with(items, now.unwrap_or_else(now_millis), DueBoundary::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-11-14T10:00:00Z
    const NOW: i64 = 1_699_956_000_000;
    const MIDNIGHT: i64 = 1_700_006_400_000;

    fn at(next_review_date: i64, repetitions: u32) -> ReviewState {
        ReviewState {
            interval: 1.0,
            ease_factor: 2.5,
            repetitions,
            next_review_date,
            last_reviewed_date: None,
            initial_rating: None,
        }
    }

    #[test]
    fn test_end_of_day_cutoff() {
        assert_eq!(due_cutoff(NOW, DueBoundary::EndOfDay), MIDNIGHT - 1);
        assert_eq!(due_cutoff(MIDNIGHT, DueBoundary::EndOfDay), MIDNIGHT + DAY_MS - 1);
        assert_eq!(due_cutoff(MIDNIGHT - 1, DueBoundary::EndOfDay), MIDNIGHT - 1);
        assert_eq!(due_cutoff(NOW, DueBoundary::Now), NOW);
    }

    #[test]
    fn test_end_of_day_boundary_instants() {
        let last_ms_today = at(MIDNIGHT - 1, 0);
        let first_ms_tomorrow = at(MIDNIGHT, 1);

        let result = classify_with(
            vec![first_ms_tomorrow.clone(), last_ms_today.clone()],
            NOW,
            DueBoundary::EndOfDay,
        );
        assert_eq!(result.due, vec![last_ms_today]);
        assert_eq!(result.upcoming, vec![first_ms_tomorrow]);
    }

    #[test]
    fn test_strict_now_boundary() {
        let result = classify_with(
            vec![at(NOW + 1, 0), at(NOW, 1), at(MIDNIGHT - 1, 2)],
            NOW,
            DueBoundary::Now,
        );
        assert_eq!(result.due, vec![at(NOW, 1)]);
        assert_eq!(result.upcoming, vec![at(NOW + 1, 0), at(MIDNIGHT - 1, 2)]);
    }

    #[test]
    fn test_partition_is_sorted_and_exhaustive() {
        let items = vec![
            at(NOW + 5 * DAY_MS, 0),
            at(NOW - DAY_MS, 1),
            at(NOW + DAY_MS, 2),
            at(NOW - 3 * DAY_MS, 3),
            at(NOW, 4),
        ];
        let result = classify_with(items.clone(), NOW, DueBoundary::EndOfDay);

        assert_eq!(result.len(), items.len());
        let dates: Vec<i64> = result.due.iter().map(|s| s.next_review_date).collect();
        assert_eq!(dates, vec![NOW - 3 * DAY_MS, NOW - DAY_MS, NOW]);
        let dates: Vec<i64> = result.upcoming.iter().map(|s| s.next_review_date).collect();
        assert_eq!(dates, vec![NOW + DAY_MS, NOW + 5 * DAY_MS]);
        for item in &items {
            let hits = result.due.iter().chain(&result.upcoming).filter(|s| *s == item).count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = vec![at(NOW, 7), at(NOW, 3), at(NOW, 9)];
        let result = classify_with(&items, NOW, DueBoundary::Now);
        let order: Vec<u32> = result.due.iter().map(|s| s.repetitions).collect();
        assert_eq!(order, vec![7, 3, 9]);
    }

    #[test]
    fn test_empty_input() {
        let result = classify(Vec::<ReviewState>::new(), Some(NOW));
        assert!(result.is_empty());
    }

    #[test]
    fn test_negative_instants() {
        // Before the epoch the day still starts at a multiple of DAY_MS.
        assert_eq!(due_cutoff(-1, DueBoundary::EndOfDay), -1);
        assert_eq!(due_cutoff(-DAY_MS - 1, DueBoundary::EndOfDay), -DAY_MS - 1);
    }

    #[test]
    fn test_cutoff_saturates_near_max() {
        let now = i64::MAX - 10;
        assert_eq!(due_cutoff(now, DueBoundary::EndOfDay), i64::MAX);
        assert_eq!(due_cutoff(i64::MAX, DueBoundary::EndOfDay), i64::MAX);

        let far = at(i64::MAX, 0);
        let result = classify(vec![far.clone()], Some(now));
        assert_eq!(result.due, vec![far]);
        assert!(result.upcoming.is_empty());
    }
}
