//! Error types for the extraction client

use thiserror::Error;

/// Errors that can occur during extraction of a single item
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The service could not be reached within the retry budget
    #[error("extraction service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service answered, but the content was not valid JSON of the
    /// expected shape. Not retried.
    #[error("invalid JSON in extraction response: {0}")]
    InvalidJson(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    /// Stable machine-readable failure tag, used in run reports.
    pub fn reason(&self) -> &'static str {
        match self {
            ExtractError::ServiceUnavailable(_) => "service_unavailable",
            ExtractError::InvalidJson(_) => "invalid_json",
            ExtractError::Config(_) => "config",
        }
    }
}
