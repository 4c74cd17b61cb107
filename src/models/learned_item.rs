//! A solved problem tracked for review, keyed by its URL.
use super::classifier::Scheduled;
use super::review_state::{RawReviewState, ReviewState};
use crate::config::SrsConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::InvalidDifficulty(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnedItem {
    pub id: String,
    pub url: String,
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub date_solved: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub algorithm: Option<String>,
    pub notes: Option<String>,
    pub code: Option<String>,
    #[serde(flatten)]
    pub review: ReviewState,
}

/// Metadata collected before the first schedule (form or extraction service).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewItem {
    pub url: String,
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub date_solved: Option<String>,
    /// Raw 1-5 rating; anything else schedules the item for tomorrow.
    pub rating: Option<i64>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub algorithm: Option<String>,
    pub notes: Option<String>,
    pub code: Option<String>,
}

impl LearnedItem {
    pub fn new(new: NewItem, review: ReviewState) -> Self {
        let url = new.url.trim().to_string();
        let title = new
            .title
            .filter(|t| !t.trim().is_empty())
            .or_else(|| infer_title(&url))
            .unwrap_or_else(|| url.clone());

        Self {
            id: url.clone(),
            url,
            title: Some(title),
            difficulty: new.difficulty,
            date_solved: new.date_solved,
            time_complexity: new.time_complexity,
            space_complexity: new.space_complexity,
            algorithm: new.algorithm,
            notes: new.notes,
            code: new.code,
            review,
        }
    }

    /// Title to show, falling back to the URL.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }

    /// Re-adding an item: fields present in `other` win, absent ones are kept.
    /// The review state is always replaced.
    pub fn merge_from(&mut self, other: LearnedItem) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.title, other.title);
        take(&mut self.difficulty, other.difficulty);
        take(&mut self.date_solved, other.date_solved);
        take(&mut self.time_complexity, other.time_complexity);
        take(&mut self.space_complexity, other.space_complexity);
        take(&mut self.algorithm, other.algorithm);
        take(&mut self.notes, other.notes);
        take(&mut self.code, other.code);
        self.review = other.review;
    }
}

impl Scheduled for LearnedItem {
    fn next_review_date(&self) -> i64 {
        self.review.next_review_date
    }
}

/// Path segments that never name a problem.
const GENERIC_SEGMENTS: [&str; 5] = ["description", "solutions", "submissions", "editorial", "problems"];

/// Derives a title from a problem URL: `.../problems/two-sum/description/` -> `Two Sum`.
///
/// Falls back to the host name; `None` when the text is not a URL.
pub fn infer_title(url: &str) -> Option<String> {
    let (_, rest) = url.trim().split_once("://")?;
    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
    if host.is_empty() {
        return None;
    }
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let slug = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .rev()
        .find(|segment| !GENERIC_SEGMENTS.contains(&segment.to_ascii_lowercase().as_str()));

    match slug {
        Some(slug) => Some(
            slug.split('-')
                .filter(|word| !word.is_empty())
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
        ),
        None => Some(host.to_string()),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses a solved date into UTC midnight epoch ms.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY` and `MM/DD` (year taken from `reference`).
pub fn parse_solved_date(text: &str, reference: i64) -> Result<i64> {
    let text = text.trim();
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%m/%d/%Y"))
        .or_else(|_| {
            let year = DateTime::from_timestamp_millis(reference)
                .map(|dt| dt.year())
                .ok_or_else(|| Error::InvalidDate(text.to_string()))?;
            NaiveDate::parse_from_str(&format!("{text}/{year}"), "%m/%d/%Y")
                .map_err(|_| Error::InvalidDate(text.to_string()))
        })?;

    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok_or_else(|| Error::InvalidDate(text.to_string()))
}

/// Item record as found in exported files, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLearnedItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub date_solved: Option<String>,
    #[serde(default)]
    pub time_complexity: Option<String>,
    #[serde(default)]
    pub space_complexity: Option<String>,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(flatten)]
    pub review: RawReviewState,
}

impl RawLearnedItem {
    /// `None` when the record has neither id nor URL, or no usable due date.
    pub fn into_item(self, config: &SrsConfig) -> Option<LearnedItem> {
        let url = self.url.or_else(|| self.id.clone())?;
        let id = self.id.unwrap_or_else(|| url.clone());
        let review = self.review.into_state(config)?;

        Some(LearnedItem {
            id,
            url,
            title: self.title,
            difficulty: self.difficulty.and_then(|d| d.parse().ok()),
            date_solved: self.date_solved,
            time_complexity: self.time_complexity,
            space_complexity: self.space_complexity,
            algorithm: self.algorithm,
            notes: self.notes,
            code: self.code,
            review,
        })
    }
}
