//! Error type shared by the scheduler, the stores and the JSON import/export.

/// Errors surfaced by the crate.
///
/// Missing or malformed review fields are never errors: they are normalized
/// to their fallbacks. Only an unknown grade fails inside the engine itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid grade: {0} (expected again, hard, good or easy)")]
    InvalidGrade(String),
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("invalid difficulty: {0} (expected easy, medium or hard)")]
    InvalidDifficulty(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
