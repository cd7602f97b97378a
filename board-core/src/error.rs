use thiserror::Error;

/// Failures of store and service operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Required input was missing or blank.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Idea not found: {0}")]
    NotFound(String),

    #[error("Idea id already exists: {0}")]
    DuplicateId(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
