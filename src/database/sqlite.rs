//! SQLite-backed item store
//!
//! One `learned_items` table holds the item metadata and its review state.
//! Timestamps are stored as epoch milliseconds.

use super::ItemStore;
use crate::error::{Error, Result};
use crate::models::{LearnedItem, ReviewPatch, ReviewState};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

const SELECT_COLUMNS: &str = "SELECT id, url, title, difficulty, date_solved, time_complexity,
        space_complexity, algorithm, notes, code, interval, ease_factor, repetitions,
        next_review_date, last_reviewed_date, initial_rating
     FROM learned_items";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and its table
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS learned_items (
                id TEXT PRIMARY KEY,
                url TEXT NOT NULL,
                title TEXT,
                difficulty TEXT,
                date_solved TEXT,
                time_complexity TEXT,
                space_complexity TEXT,
                algorithm TEXT,
                notes TEXT,
                code TEXT,
                interval REAL NOT NULL DEFAULT 1,
                ease_factor REAL NOT NULL DEFAULT 2.5,
                repetitions INTEGER NOT NULL DEFAULT 0,
                next_review_date INTEGER NOT NULL,
                last_reviewed_date INTEGER,
                initial_rating INTEGER
            )",
            (),
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_learned_items_due ON learned_items(next_review_date)",
            (),
        )?;

        Ok(Self { conn })
    }
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<LearnedItem> {
    let difficulty: Option<String> = row.get(3)?;
    let repetitions: i64 = row.get(12)?;
    let initial_rating: Option<i64> = row.get(15)?;

    Ok(LearnedItem {
        id: row.get(0)?,
        url: row.get(1)?,
        title: row.get(2)?,
        difficulty: difficulty.and_then(|d| d.parse().ok()),
        date_solved: row.get(4)?,
        time_complexity: row.get(5)?,
        space_complexity: row.get(6)?,
        algorithm: row.get(7)?,
        notes: row.get(8)?,
        code: row.get(9)?,
        review: ReviewState {
            interval: row.get(10)?,
            ease_factor: row.get(11)?,
            repetitions: u32::try_from(repetitions).unwrap_or(0),
            next_review_date: row.get(13)?,
            last_reviewed_date: row.get(14)?,
            initial_rating: initial_rating
                .filter(|r| (1..=5).contains(r))
                .map(|r| r as u8),
        },
    })
}

impl ItemStore for SqliteStore {
    fn get(&self, id: &str) -> Result<Option<LearnedItem>> {
        let item = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                item_from_row,
            )
            .optional()?;
        Ok(item)
    }

    /// Returns all items, soonest due first
    fn list(&self) -> Result<Vec<LearnedItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY next_review_date ASC, id ASC"))?;

        let items = stmt
            .query_map([], item_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(items)
    }

    fn put(&mut self, item: LearnedItem) -> Result<()> {
        let review = &item.review;
        self.conn.execute(
            "INSERT OR REPLACE INTO learned_items (
                id, url, title, difficulty, date_solved, time_complexity, space_complexity,
                algorithm, notes, code, interval, ease_factor, repetitions,
                next_review_date, last_reviewed_date, initial_rating
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                item.id,
                item.url,
                item.title,
                item.difficulty.map(|d| d.as_str()),
                item.date_solved,
                item.time_complexity,
                item.space_complexity,
                item.algorithm,
                item.notes,
                item.code,
                review.interval,
                review.ease_factor,
                i64::from(review.repetitions),
                review.next_review_date,
                review.last_reviewed_date,
                review.initial_rating.map(i64::from),
            ],
        )?;

        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<Option<LearnedItem>> {
        let existing = self.get(id)?;
        if existing.is_some() {
            self.conn
                .execute("DELETE FROM learned_items WHERE id = ?1", params![id])?;
        }
        Ok(existing)
    }

    /// Updates the review columns in a single statement
    fn apply_patch(&mut self, id: &str, patch: &ReviewPatch) -> Result<LearnedItem> {
        let changed = self.conn.execute(
            "UPDATE learned_items
             SET interval = ?1, ease_factor = ?2, repetitions = ?3,
                 next_review_date = ?4, last_reviewed_date = ?5
             WHERE id = ?6",
            params![
                patch.interval,
                patch.ease_factor,
                i64::from(patch.repetitions),
                patch.next_review_date,
                patch.last_reviewed_date,
                id
            ],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        self.get(id)?.ok_or_else(|| Error::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, NewItem, Sm2Scheduler};

    fn item(url: &str, rating: i64, solved_at: i64) -> LearnedItem {
        LearnedItem::new(
            NewItem {
                url: url.to_string(),
                difficulty: Some(Difficulty::Medium),
                notes: Some("two pointers".to_string()),
                ..NewItem::default()
            },
            Sm2Scheduler::default().schedule(Some(rating), solved_at),
        )
    }

    #[test]
    fn test_put_and_get_preserves_fields() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let original = item("https://leetcode.com/problems/3sum", 4, 1_000);
        store.put(original.clone()).unwrap();

        let loaded = store.get(&original.id).unwrap().unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.difficulty, Some(Difficulty::Medium));
        assert_eq!(loaded.review.initial_rating, Some(4));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_put_replaces_existing() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut first = item("https://leetcode.com/problems/3sum", 4, 1_000);
        store.put(first.clone()).unwrap();

        first.notes = Some("sort first".to_string());
        store.put(first.clone()).unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].notes.as_deref(), Some("sort first"));
    }

    #[test]
    fn test_list_orders_by_due_date() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.put(item("https://leetcode.com/problems/late", 5, 0)).unwrap();
        store.put(item("https://leetcode.com/problems/soon", 1, 0)).unwrap();

        let titles: Vec<String> = store
            .list()
            .unwrap()
            .iter()
            .map(|i| i.display_title().to_string())
            .collect();
        assert_eq!(titles, vec!["Soon", "Late"]);
    }

    #[test]
    fn test_apply_patch_updates_review_columns() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let original = item("https://leetcode.com/problems/3sum", 3, 1_000);
        store.put(original.clone()).unwrap();

        let patch = Sm2Scheduler::default().grade(&original.review, crate::models::Grade::Good, 5_000);
        let updated = store.apply_patch(&original.id, &patch).unwrap();

        assert_eq!(updated.review.repetitions, 1);
        assert_eq!(updated.review.last_reviewed_date, Some(5_000));
        assert_eq!(updated.notes, original.notes);
    }

    #[test]
    fn test_apply_patch_missing_is_not_found() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let patch = ReviewPatch {
            interval: 1.0,
            ease_factor: 2.5,
            repetitions: 0,
            next_review_date: 0,
            last_reviewed_date: 0,
        };
        assert!(matches!(
            store.apply_patch("missing", &patch),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_returns_removed_item() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let original = item("https://leetcode.com/problems/3sum", 3, 1_000);
        store.put(original.clone()).unwrap();

        assert_eq!(store.delete(&original.id).unwrap(), Some(original.clone()));
        assert_eq!(store.delete(&original.id).unwrap(), None);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_open_file_persists_between_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.sqlite3");
        let original = item("https://leetcode.com/problems/3sum", 2, 1_000);

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.put(original.clone()).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get(&original.id).unwrap(), Some(original));
    }
}
