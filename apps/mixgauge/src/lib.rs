//! # MixGauge Library
//!
//! This library exposes the MixGauge modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;

pub use error::AppError;

// Re-export mixgauge_core for convenience
pub use mixgauge_core;
