//! Error types for segment-wind

use thiserror::Error;

/// Errors that can occur while loading inputs or evaluating segments
#[derive(Debug, Error)]
pub enum WindError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Malformed time string: {0:?}")]
    TimeParse(String),

    #[error("Malformed distance string: {0:?}")]
    DistanceParse(String),

    #[error("Unknown compass direction: {0:?}")]
    UnknownDirection(String),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}")]
    Upstream { service: &'static str, status: String },

    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),
}
