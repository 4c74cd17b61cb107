//! JSON import/export of learned items.
//! The file is a JSON array of flat camelCase item records.

use crate::config::SrsConfig;
use crate::error::Result;
use crate::models::LearnedItem;
use crate::models::learned_item::RawLearnedItem;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Writes items to a pretty-printed JSON file at `path`.
pub fn export_items_to_path(items: &[LearnedItem], path: impl AsRef<Path>) -> Result<()> {
    let json_string = serde_json::to_string_pretty(items)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Reads items exported by [`export_items_to_path`] (or an older, looser
/// variant of the format).
///
/// Records that cannot be scheduled are skipped with a warning; a file that is
/// not a JSON array is an error.
pub fn import_items(path: impl AsRef<Path>, config: &SrsConfig) -> Result<Vec<LearnedItem>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<serde_json::Value> = serde_json::from_reader(reader)?;

    let items = items_from_records(records, config);
    tracing::info!(count = items.len(), path = %path.display(), "items imported");
    Ok(items)
}

/// Same as [`import_items`] for an in-memory document.
pub fn import_items_from_str(json: &str, config: &SrsConfig) -> Result<Vec<LearnedItem>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(items_from_records(records, config))
}

fn items_from_records(records: Vec<serde_json::Value>, config: &SrsConfig) -> Vec<LearnedItem> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let item = serde_json::from_value::<RawLearnedItem>(record)
                .map_err(|e| tracing::warn!(index, "skipping malformed record: {e}"))
                .ok()?
                .into_item(config);
            if item.is_none() {
                tracing::warn!(index, "skipping record without id or due date");
            }
            item
        })
        .collect()
}
