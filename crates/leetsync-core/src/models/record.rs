//! Persisted record entry model

use serde::{Deserialize, Serialize};

use super::Difficulty;

/// Reduced summary of a synced submission.
///
/// Two entries are duplicates only when every field matches, so the same
/// problem can appear twice if its title, difficulty, or tags changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub id: u32,
    pub title: String,
    pub title_slug: String,
    pub difficulty: Difficulty,
    /// Topic tags, sorted ascending
    pub skills: Vec<String>,
}

impl RecordEntry {
    /// Create an entry, sorting `skills` ascending.
    #[must_use]
    pub fn new(
        id: u32,
        title: impl Into<String>,
        title_slug: impl Into<String>,
        difficulty: Difficulty,
        mut skills: Vec<String>,
    ) -> Self {
        skills.sort();
        Self {
            id,
            title: title.into(),
            title_slug: title_slug.into(),
            difficulty,
            skills,
        }
    }
}

/// Sort entries ascending by id, keeping insertion order among equal ids.
pub fn sort_by_id(entries: &mut [RecordEntry]) {
    entries.sort_by_key(|entry| entry.id);
}
