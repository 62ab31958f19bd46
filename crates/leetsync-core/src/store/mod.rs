//! Persisted collection of synced problems.
//!
//! The whole collection lives in one pretty-printed JSON array, sorted by
//! problem id, and is rewritten in full on every change.

mod index;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::{sort_by_id, RecordEntry};
use crate::Result;

pub use index::{render_index, IndexStats};

pub const RECORDS_FILE: &str = "submissions.json";
pub const INDEX_FILE: &str = "README.md";

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted at a repository working tree.
    pub fn in_repo(root: &Path) -> Self {
        Self::new(root.join(RECORDS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries; a missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<RecordEntry>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }

    /// Replace the persisted collection, sorted ascending by id.
    pub fn save(&self, entries: &[RecordEntry]) -> Result<()> {
        let mut sorted = entries.to_vec();
        sort_by_id(&mut sorted);
        std::fs::write(&self.path, serde_json::to_string_pretty(&sorted)?)?;
        Ok(())
    }

    /// The collection with `entry` appended and re-sorted, or `None` when an
    /// identical entry is already stored. Nothing is written.
    pub fn merge(&self, entry: RecordEntry) -> Result<Option<Vec<RecordEntry>>> {
        let mut entries = self.load()?;
        if entries.contains(&entry) {
            return Ok(None);
        }

        entries.push(entry);
        sort_by_id(&mut entries);
        Ok(Some(entries))
    }
}

/// Write the rendered index document into the repository root.
pub fn write_index(root: &Path, entries: &[RecordEntry]) -> Result<()> {
    std::fs::write(root.join(INDEX_FILE), render_index(entries))?;
    Ok(())
}
