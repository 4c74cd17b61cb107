//! Spaced-repetition scheduling for solved coding problems.
//!
//! The core is pure: [`schedule`] derives the first review from a 1-5 rating,
//! [`grade`] computes the next review state from a recall grade and
//! [`classify`] splits items into due and upcoming. Storage lives behind
//! [`database::ItemStore`].

pub mod config;
pub mod database;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use config::{DueBoundary, SrsConfig};
pub use error::{Error, Result};
pub use models::{
    Classification, Difficulty, Grade, LearnedItem, NewItem, ReviewPatch, ReviewSession,
    ReviewState, Sm2Scheduler, classify, classify_with, grade, schedule,
};
pub use service::ReviewService;
