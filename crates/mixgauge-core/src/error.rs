//! # Errors
//!
//! Loading the model artifact and calling it fail in different ways and are
//! reported at different times, so they are separate types.

use std::path::PathBuf;
use thiserror::Error;

/// The model artifact could not be loaded. Prediction stays disabled.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported model format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid model artifact: {0}")]
    Schema(String),
}

/// A single prediction request failed. The next request may succeed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// No predictor is loaded; carries the load failure message.
    #[error("prediction unavailable: {0}")]
    Unavailable(String),

    /// The mix does not meet the preconditions of a prediction request.
    #[error("invalid mix: {0}")]
    InvalidMix(String),

    /// The predictor itself reported an error.
    #[error("predictor failed: {0}")]
    Predictor(String),

    /// The predictor returned something that is not a strength.
    #[error("predictor returned a malformed value: {0}")]
    Malformed(String),
}

impl PredictionError {
    /// Stable snake_case tag for API clients.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Unavailable(_) => "unavailable",
            PredictionError::InvalidMix(_) => "invalid_mix",
            PredictionError::Predictor(_) => "predictor",
            PredictionError::Malformed(_) => "malformed",
        }
    }
}
