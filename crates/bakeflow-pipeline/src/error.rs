//! Pipeline error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("No IPv4 address on instance {0}")]
    NoIpAddress(String),

    #[error("Core error: {0}")]
    Core(#[from] bakeflow_core::CoreError),

    #[error("NHN Cloud error: {0}")]
    Nhn(#[from] bakeflow_cloud_nhn::NhnError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
