//! Error types for the trefwoord library.
//!
//! All errors are represented by the [`TrefwoordError`] enum. The only error
//! that can abort a prediction run is a configuration error raised once at
//! startup (empty or malformed vocabulary); normalization and search never
//! fail per word.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for trefwoord operations.
#[derive(Error, Debug)]
pub enum TrefwoordError {
    /// I/O errors (word lists, vocabulary files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (empty or malformed vocabulary, bad rule tiers)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// External phonetic predictor could not be invoked
    #[error("Phonetic predictor error: {0}")]
    Phonetic(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TrefwoordError.
pub type Result<T> = std::result::Result<T, TrefwoordError>;

impl TrefwoordError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        TrefwoordError::Configuration(msg.into())
    }

    /// Create a new phonetic predictor error.
    pub fn phonetic<S: Into<String>>(msg: S) -> Self {
        TrefwoordError::Phonetic(msg.into())
    }
}
