//! Scheduling fields attached to every learned item.

use crate::config::SrsConfig;
use serde::{Deserialize, Deserializer, Serialize};

/// One day in milliseconds. Days are fixed-length; there is no calendar math.
pub const DAY_MS: i64 = 86_400_000;

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Review state of one item.
///
/// Invariants after any scheduler operation: `interval >= 1` and
/// `ease_factor >= min_ease`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Days until the next review.
    pub interval: f64,
    pub ease_factor: f64,
    /// Consecutive non-Again grades since the last reset.
    pub repetitions: u32,
    /// Epoch milliseconds at which the item becomes due.
    pub next_review_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_date: Option<i64>,
    /// First-pass difficulty rating (1-5). Only the initial scheduler reads it.
    #[serde(rename = "rating", skip_serializing_if = "Option::is_none")]
    pub initial_rating: Option<u8>,
}

/// Fields produced by one grading event. The caller applies it to storage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReviewPatch {
    pub interval: f64,
    pub ease_factor: f64,
    pub repetitions: u32,
    pub next_review_date: i64,
    pub last_reviewed_date: i64,
}

impl ReviewState {
    /// Returns a copy with invalid numeric fields replaced by their fallbacks.
    pub fn normalized(&self, config: &SrsConfig) -> ReviewState {
        ReviewState {
            interval: normalize_interval(Some(self.interval)),
            ease_factor: normalize_ease(Some(self.ease_factor), config),
            ..self.clone()
        }
    }

    pub fn apply(&mut self, patch: &ReviewPatch) {
        self.interval = patch.interval;
        self.ease_factor = patch.ease_factor;
        self.repetitions = patch.repetitions;
        self.next_review_date = patch.next_review_date;
        self.last_reviewed_date = Some(patch.last_reviewed_date);
    }
}

fn normalize_interval(interval: Option<f64>) -> f64 {
    match interval {
        Some(days) if days.is_finite() && days > 0.0 => days,
        _ => 1.0,
    }
}

fn normalize_ease(ease: Option<f64>, config: &SrsConfig) -> f64 {
    match ease {
        Some(ease) if ease.is_finite() => ease.max(config.min_ease),
        _ => config.default_ease.max(config.min_ease),
    }
}

/// Review fields as found in stored or imported records, where any of them
/// may be missing or carry the wrong type.
///
/// Defaults are resolved once in [`RawReviewState::into_state`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReviewState {
    #[serde(default, deserialize_with = "lenient_number")]
    pub interval: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub ease_factor: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub repetitions: Option<f64>,
    #[serde(default, deserialize_with = "lenient_millis")]
    pub next_review_date: Option<i64>,
    #[serde(default, deserialize_with = "lenient_millis")]
    pub last_reviewed_date: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
}

impl RawReviewState {
    /// Builds a fully populated state. Returns `None` when there is no usable
    /// due date, since such a record cannot be scheduled.
    pub fn into_state(self, config: &SrsConfig) -> Option<ReviewState> {
        let next_review_date = self.next_review_date?;
        let repetitions = match self.repetitions {
            Some(reps) if reps.is_finite() && reps > 0.0 => reps.min(u32::MAX as f64) as u32,
            _ => 0,
        };
        let initial_rating = self
            .rating
            .filter(|r| r.fract() == 0.0 && (1.0..=5.0).contains(r))
            .map(|r| r as u8);

        Some(ReviewState {
            interval: normalize_interval(self.interval),
            ease_factor: normalize_ease(self.ease_factor, config),
            repetitions,
            next_review_date,
            last_reviewed_date: self.last_reviewed_date,
            initial_rating,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberRepr>::deserialize(deserializer)? {
        Some(NumberRepr::Number(n)) if n.is_finite() => Some(n),
        Some(NumberRepr::Text(text)) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map(|ms| ms.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawReviewState {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_fields_take_fallbacks() {
        let state = raw(r#"{ "nextReviewDate": 1000 }"#)
            .into_state(&SrsConfig::default())
            .unwrap();

        assert_eq!(state.interval, 1.0);
        assert_eq!(state.ease_factor, 2.5);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.last_reviewed_date, None);
    }

    #[test]
    fn test_string_timestamps_are_accepted() {
        let state = raw(r#"{ "nextReviewDate": "1700000000000", "lastReviewedDate": "1600000000000" }"#)
            .into_state(&SrsConfig::default())
            .unwrap();

        assert_eq!(state.next_review_date, 1_700_000_000_000);
        assert_eq!(state.last_reviewed_date, Some(1_600_000_000_000));
    }

    #[test]
    fn test_unusable_due_date_is_rejected() {
        let config = SrsConfig::default();
        assert!(raw(r#"{ "interval": 3 }"#).into_state(&config).is_none());
        assert!(raw(r#"{ "nextReviewDate": "soon" }"#).into_state(&config).is_none());
        assert!(raw(r#"{ "nextReviewDate": true }"#).into_state(&config).is_none());
    }

    #[test]
    fn test_invalid_values_are_normalized() {
        let state = raw(
            r#"{ "nextReviewDate": 5, "interval": -2, "easeFactor": 0.4, "repetitions": -3, "rating": 9 }"#,
        )
        .into_state(&SrsConfig::default())
        .unwrap();

        assert_eq!(state.interval, 1.0);
        assert_eq!(state.ease_factor, 1.3);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.initial_rating, None);
    }

    #[test]
    fn test_normalized_repairs_in_memory_state() {
        let state = ReviewState {
            interval: f64::NAN,
            ease_factor: f64::INFINITY,
            repetitions: 2,
            next_review_date: 0,
            last_reviewed_date: None,
            initial_rating: Some(4),
        };

        let fixed = state.normalized(&SrsConfig::default());
        assert_eq!(fixed.interval, 1.0);
        assert_eq!(fixed.ease_factor, 2.5);
        assert_eq!(fixed.repetitions, 2);
        assert_eq!(fixed.initial_rating, Some(4));
    }

    #[test]
    fn test_apply_patch() {
        let mut state = ReviewState {
            interval: 2.0,
            ease_factor: 2.5,
            repetitions: 1,
            next_review_date: 0,
            last_reviewed_date: None,
            initial_rating: None,
        };
        let patch = ReviewPatch {
            interval: 5.0,
            ease_factor: 2.5,
            repetitions: 2,
            next_review_date: 5 * DAY_MS,
            last_reviewed_date: 42,
        };

        state.apply(&patch);
        assert_eq!(state.interval, 5.0);
        assert_eq!(state.repetitions, 2);
        assert_eq!(state.next_review_date, 5 * DAY_MS);
        assert_eq!(state.last_reviewed_date, Some(42));
    }
}
