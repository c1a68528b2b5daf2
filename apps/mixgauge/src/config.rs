//! Server configuration.

use crate::error::AppError;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/strength_model.json";

pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 8080;

/// Prediction requests admitted per second across all clients.
pub const DEFAULT_RATE_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    /// When set, `/api/*` requires `Authorization: Bearer <key>`.
    pub api_key: Option<String>,
    pub rate_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            api_key: None,
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Rate limit as the non-zero quota governor expects.
    pub fn rate_limit_per_second(&self) -> Result<NonZeroU32, AppError> {
        NonZeroU32::new(self.rate_limit).ok_or_else(|| {
            AppError::InvalidArgument("rate limit must be at least 1 request/second".to_string())
        })
    }

    /// The API key, ignoring an empty string.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}
