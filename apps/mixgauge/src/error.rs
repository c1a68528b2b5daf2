//! Application errors for CLI commands and server startup.

use mixgauge_core::ModelLoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("server error: {0}")]
    Server(String),
}
