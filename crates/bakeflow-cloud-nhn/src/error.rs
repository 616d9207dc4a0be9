//! NHN Cloud client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NhnError {
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Compute endpoint not found for region: {0}")]
    EndpointNotFound(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NhnError>;
