use thiserror::Error;

pub type Result<T> = std::result::Result<T, SuggestError>;

/// Custom error types for manasift
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to decode stored history: {0}")]
    Decode(String),

    #[error("Failed to encode history: {0}")]
    Encode(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Field key '{0}' is registered more than once")]
    DuplicateFieldKey(String),
}

impl From<std::io::Error> for SuggestError {
    fn from(err: std::io::Error) -> Self {
        SuggestError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SuggestError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            SuggestError::Io(err.to_string())
        } else {
            SuggestError::Decode(err.to_string())
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
