//! Markdown index rendering for the archive's top-level README.

use std::fmt::Write as _;

use crate::models::{Difficulty, RecordEntry};

const PROBLEM_URL: &str = "https://leetcode.com/problems";
const ATTRIBUTION: &str =
    "> Auto-generated with [leetsync](https://github.com/Error0229/leetsync)";

/// Aggregate counts shown in the index header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub total: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl IndexStats {
    /// `total` counts every entry; the per-level counts only see exact
    /// Easy/Medium/Hard labels.
    #[must_use]
    pub fn from_entries(entries: &[RecordEntry]) -> Self {
        entries.iter().fold(
            Self {
                total: entries.len(),
                ..Self::default()
            },
            |mut stats, entry| {
                match entry.difficulty {
                    Difficulty::Easy => stats.easy += 1,
                    Difficulty::Medium => stats.medium += 1,
                    Difficulty::Hard => stats.hard += 1,
                    Difficulty::Other(_) => {}
                }
                stats
            },
        )
    }
}

fn badge_url(difficulty: &Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "https://img.shields.io/badge/Easy-green",
        Difficulty::Medium => "https://img.shields.io/badge/Medium-orange",
        Difficulty::Hard => "https://img.shields.io/badge/Hard-red",
        Difficulty::Other(_) => "",
    }
}

/// Render the full index document for `entries`, in the given order.
#[must_use]
pub fn render_index(entries: &[RecordEntry]) -> String {
    let stats = IndexStats::from_entries(entries);
    let mut output = String::new();

    let _ = writeln!(output, "# LeetCode Submissions");
    let _ = writeln!(output);
    let _ = writeln!(output, "{ATTRIBUTION}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## 📊 Stats");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "![Total](https://img.shields.io/badge/Total-{}-blue)",
        stats.total
    );
    let _ = writeln!(
        output,
        "![Easy](https://img.shields.io/badge/Easy-{}-green)",
        stats.easy
    );
    let _ = writeln!(
        output,
        "![Medium](https://img.shields.io/badge/Medium-{}-orange)",
        stats.medium
    );
    let _ = writeln!(
        output,
        "![Hard](https://img.shields.io/badge/Hard-{}-red)",
        stats.hard
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "---");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Contents");
    let _ = writeln!(output);
    let _ = writeln!(output, "| # | Title | Difficulty | Skills |");
    let _ = writeln!(output, "|---| ----- | ---------- | ------ |");

    for entry in entries {
        let skills = entry
            .skills
            .iter()
            .map(|skill| format!("`{skill}`"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            output,
            "| {:04} | [{}]({PROBLEM_URL}/{}) | ![{}]({}) | {} |",
            entry.id,
            entry.title,
            entry.title_slug,
            entry.difficulty,
            badge_url(&entry.difficulty),
            skills
        );
    }

    output.trim().to_string()
}
