//! Solved problem model

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::RecordEntry;

/// Judge-reported difficulty level.
///
/// Labels other than the three known levels are kept verbatim so they can
/// still be rendered, but they do not count toward difficulty aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Other(label) => label,
        }
    }

    /// Whether this is one of the three levels the judge documents.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Easy" => Self::Easy,
            "Medium" => Self::Medium,
            "Hard" => Self::Hard,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Difficulty {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The latest accepted submission for one problem, as scraped from the judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedProblem {
    /// Frontend question id shown on the judge
    pub id: u32,
    pub title: String,
    pub title_slug: String,
    /// Problem statement (HTML)
    pub content: String,
    pub difficulty: Difficulty,
    /// Topic tag names
    pub skills: Vec<String>,
    /// Submission time (Unix seconds)
    pub timestamp: i64,
    /// Judge language name, e.g. "Python3"
    pub language: String,
    pub code: String,
}

impl SolvedProblem {
    /// Submission time in the local timezone.
    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Local> {
        DateTime::from_timestamp(self.timestamp, 0)
            .unwrap_or_default()
            .with_timezone(&Local)
    }

    /// Filename-safe token: `YYYY-MM-DDTHH-MM-SS_<epoch>`.
    #[must_use]
    pub fn timestamp_token(&self) -> String {
        format!(
            "{}_{}",
            self.submitted_at().format("%Y-%m-%dT%H-%M-%S"),
            self.timestamp
        )
    }

    /// `<4-digit id>-<title_slug>`
    #[must_use]
    pub fn directory_name(&self) -> String {
        format!("{:04}-{}", self.id, self.title_slug)
    }

    #[must_use]
    pub fn file_extension(&self) -> String {
        language_extension(&self.language)
    }

    #[must_use]
    pub fn solution_file_name(&self) -> String {
        format!("{}.{}", self.timestamp_token(), self.file_extension())
    }

    /// Commit message for this submission. Doubles as the idempotence key.
    #[must_use]
    pub fn commit_message(&self) -> String {
        format!(
            "LeetCode [{}] {} | {} | {}",
            self.id,
            self.title,
            self.language,
            self.solution_file_name()
        )
    }

    /// Reduced projection persisted in the record store.
    #[must_use]
    pub fn to_record(&self) -> RecordEntry {
        RecordEntry::new(
            self.id,
            self.title.clone(),
            self.title_slug.clone(),
            self.difficulty.clone(),
            self.skills.clone(),
        )
    }
}

/// Map a judge language name to a source file extension.
///
/// Unknown languages fall back to the lowercased name with spaces removed.
#[must_use]
pub fn language_extension(language: &str) -> String {
    match language {
        "C++" => "cpp".to_string(),
        "JavaScript" | "JavaScript (Node.js)" => "js".to_string(),
        "MySQL" => "sql".to_string(),
        "Bash" => "sh".to_string(),
        "Python" => "py".to_string(),
        "Java" => "java".to_string(),
        other => other.to_lowercase().replace(' ', ""),
    }
}
