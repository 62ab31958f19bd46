//! Error types for leetsync-core

use thiserror::Error;

use crate::judge::JudgeError;

/// Result type alias using leetsync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in leetsync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Judge API error
    #[error(transparent)]
    Judge(#[from] JudgeError),

    /// git error
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
