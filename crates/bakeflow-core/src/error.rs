//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource entered failure state: {0}")]
    FailedState(String),

    #[error("Timed out after {waited_secs}s waiting for {subject}")]
    Timeout { subject: String, waited_secs: u64 },

    #[error("Identifier already assigned for {0}")]
    IdentifierReassigned(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
