//! Error types for rule loading

use thiserror::Error;

/// Errors that can occur while loading or validating classifier rules
#[derive(Error, Debug)]
pub enum RulesError {
    /// TOML parse error
    #[error("failed to parse rules: {0}")]
    Parse(String),

    /// Rule vocabulary failed validation
    #[error("invalid rules: {0}")]
    Invalid(String),
}
