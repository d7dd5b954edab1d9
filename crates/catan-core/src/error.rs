//! Errors raised while loading and constructing a board.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort the load → number → layout → validate pipeline.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Board file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Malformed board description: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Invalid board: {0}")]
    InvalidBoardCount(String),

    #[error("No desert tile to use as the grid origin")]
    MissingDesert,

    #[error("Board validation failed:\n{0}")]
    InvalidBoardStructure(String),

    #[error("Unexpected failure: {0}")]
    UnexpectedFailure(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BoardError>;
