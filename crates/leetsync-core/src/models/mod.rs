//! Data models for leetsync

mod problem;
mod record;

pub use problem::{language_extension, Difficulty, SolvedProblem};
pub use record::{sort_by_id, RecordEntry};
