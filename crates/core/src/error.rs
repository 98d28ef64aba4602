//! Error types for the sentiment-analysis pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the sentiment-analysis pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input error (missing or malformed input file).
    #[error("Input error: {0}")]
    Input(String),

    /// Date or timestamp parse error on a fatal field.
    #[error("Date parse error: {0}")]
    DateParse(String),

    /// Chart rendering error.
    #[error("Chart error: {0}")]
    Chart(String),

    /// Export error (writing output artifacts).
    #[error("Export error: {0}")]
    Export(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse or write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an input error.
    pub fn input(msg: impl Into<String>) -> Self {
        Error::Input(msg.into())
    }

    /// Create a date parse error.
    pub fn date_parse(msg: impl Into<String>) -> Self {
        Error::DateParse(msg.into())
    }

    /// Create a chart rendering error.
    pub fn chart(msg: impl Into<String>) -> Self {
        Error::Chart(msg.into())
    }

    /// Create an export error.
    pub fn export(msg: impl Into<String>) -> Self {
        Error::Export(msg.into())
    }
}
