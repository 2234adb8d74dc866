//! Error types for the pipeline

use thiserror::Error;

/// Run-fatal pipeline errors.
///
/// Per-item failures never surface here; they are collected in the run
/// report instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The mail provider could not be reached or refused the listing
    #[error("mail provider error: {0}")]
    Provider(String),

    /// The record store could not be reached
    #[error("store error: {0}")]
    Store(String),

    /// Every item in the run failed with a transport error - the
    /// extraction service is down
    #[error("extraction service unavailable: all {0} items failed")]
    ServiceUnavailable(usize),
}
