//! Tunable scheduling constants.
//!
//! Every field has a serde default, so a config file only needs the keys it
//! wants to change.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_EASE: f64 = 2.5;
pub const MIN_EASE: f64 = 1.3;
pub const AGAIN_INTERVAL: f64 = 1.0;
pub const AGAIN_EASE_PENALTY: f64 = 0.20;
pub const HARD_EASE_PENALTY: f64 = 0.15;
pub const EASY_EASE_BONUS: f64 = 0.15;
pub const HARD_INTERVAL_MULTIPLIER: f64 = 1.2;
pub const EASY_INTERVAL_BONUS: f64 = 1.3;
/// First interval in days for ratings 1..=5.
pub const RATING_INTERVALS: [f64; 5] = [1.0, 1.0, 2.0, 3.0, 4.0];

/// Where the "due" partition ends relative to the reference instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueBoundary {
    /// Due iff `next_review_date <= now`.
    Now,
    /// Due iff scheduled at or before the last millisecond of the current UTC day.
    #[default]
    EndOfDay,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrsConfig {
    pub default_ease: f64,
    pub min_ease: f64,
    pub again_interval: f64,
    pub again_ease_penalty: f64,
    pub hard_ease_penalty: f64,
    pub easy_ease_bonus: f64,
    pub hard_interval_multiplier: f64,
    pub easy_interval_bonus: f64,
    pub rating_intervals: [f64; 5],
    pub due_boundary: DueBoundary,
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            default_ease: DEFAULT_EASE,
            min_ease: MIN_EASE,
            again_interval: AGAIN_INTERVAL,
            again_ease_penalty: AGAIN_EASE_PENALTY,
            hard_ease_penalty: HARD_EASE_PENALTY,
            easy_ease_bonus: EASY_EASE_BONUS,
            hard_interval_multiplier: HARD_INTERVAL_MULTIPLIER,
            easy_interval_bonus: EASY_INTERVAL_BONUS,
            rating_intervals: RATING_INTERVALS,
            due_boundary: DueBoundary::default(),
        }
    }
}

impl SrsConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SrsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Rejects constants that would break the `ease >= min_ease` and
    /// `interval >= 1` invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_ease.is_finite() && self.min_ease > 0.0) {
            return Err(Error::Config(format!(
                "min_ease must be positive, got {}",
                self.min_ease
            )));
        }
        if !(self.default_ease.is_finite() && self.default_ease >= self.min_ease) {
            return Err(Error::Config(format!(
                "default_ease {} is below min_ease {}",
                self.default_ease, self.min_ease
            )));
        }
        if !(self.again_interval.is_finite() && self.again_interval >= 1.0) {
            return Err(Error::Config(format!(
                "again_interval must be at least 1 day, got {}",
                self.again_interval
            )));
        }
        for (name, value) in [
            ("hard_interval_multiplier", self.hard_interval_multiplier),
            ("easy_interval_bonus", self.easy_interval_bonus),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [
            ("again_ease_penalty", self.again_ease_penalty),
            ("hard_ease_penalty", self.hard_ease_penalty),
            ("easy_ease_bonus", self.easy_ease_bonus),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::Config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if let Some(bad) = self
            .rating_intervals
            .iter()
            .find(|days| !(days.is_finite() && **days >= 1.0))
        {
            return Err(Error::Config(format!(
                "rating intervals must be at least 1 day, got {bad}"
            )));
        }
        Ok(())
    }
}
