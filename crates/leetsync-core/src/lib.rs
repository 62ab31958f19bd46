//! leetsync-core - Core library for leetsync
//!
//! This crate contains the judge client, the record store, and the git
//! archiving logic used by the `leetsync` CLI.

pub mod config;
pub mod error;
pub mod git;
pub mod judge;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod sync;

pub use error::{Error, Result};
pub use models::{Difficulty, RecordEntry, SolvedProblem};
