//! Terminal progress reporting.

use parcelscan_pipeline::ProgressSink;
use std::io::{self, Write};

/// Progress sink that rewrites a single stderr line per update.
///
/// Stdout stays clean for the formatted results.
#[derive(Debug, Default)]
pub struct StderrProgress;

impl StderrProgress {
    /// Create a new stderr progress sink.
    pub fn new() -> Self {
        Self
    }

    /// Clear the progress line once the run is over.
    pub fn finish(&self) {
        eprint!("\r\x1b[2K");
        let _ = io::stderr().flush();
    }
}

impl ProgressSink for StderrProgress {
    fn update(&self, current: usize, total: usize, status: &str) {
        if total == 0 {
            eprint!("\r\x1b[2K{}...", status);
        } else {
            eprint!("\r\x1b[2K{} [{}/{}]", status, current, total);
        }
        let _ = io::stderr().flush();
    }
}
