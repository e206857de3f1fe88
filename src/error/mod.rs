//! Error handling module for ClipDeck

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for ClipDeck operations
#[derive(Error, Debug)]
pub enum ClipDeckError {
    /// Invalid time format
    #[error("Invalid time format: {time}. Expected seconds, M:SS, or H:MM:SS")]
    InvalidTimeFormat { time: String },

    /// Domain rule or gateway failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Store snapshot could not be read or written
    #[error("Store snapshot error at {path}: {message}")]
    Snapshot { path: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for ClipDeck operations
pub type ClipDeckResult<T> = std::result::Result<T, ClipDeckError>;
