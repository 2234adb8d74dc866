//! Parcelscan LLM Transport Layer
//!
//! Implementations of the `ChatCompleter` trait from `parcelscan-domain`,
//! plus the shared retry-with-backoff utility the extraction client uses.
//!
//! # Providers
//!
//! - [`MockCompleter`]: deterministic, scriptable mock for testing
//! - [`ChatEndpoint`]: HTTPS chat-completions endpoint with an api-key
//!   header
//!
//! A completer performs exactly one attempt per call; retry policy is the
//! caller's concern and lives in [`retry_with_backoff`].
//!
//! # Examples
//!
//! ```
//! use parcelscan_llm::MockCompleter;
//! use parcelscan_domain::ChatCompleter;
//!
//! let completer = MockCompleter::new(r#"{"delivery": "yes"}"#);
//! let result = completer.complete("any prompt").unwrap();
//! assert_eq!(result, r#"{"delivery": "yes"}"#);
//! ```

#![warn(missing_docs)]

pub mod endpoint;
pub mod retry;

use parcelscan_domain::ChatCompleter;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use endpoint::ChatEndpoint;
pub use retry::retry_with_backoff;

/// Errors that can occur during a completion attempt
#[derive(Error, Debug)]
pub enum CompleterError {
    /// Network or transport error
    #[error("communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status from the service
    #[error("service returned HTTP {code}: {body}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Response body, for diagnosis
        body: String,
    },

    /// Response arrived but did not match the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("completer error: {0}")]
    Other(String),
}

/// Scriptable completer for deterministic testing.
///
/// Scripted steps are consumed front to back; once the script is exhausted
/// every call returns the default outcome. All handles share state, so a
/// clone passed into a client can still be inspected from the test.
///
/// # Examples
///
/// ```
/// use parcelscan_llm::MockCompleter;
/// use parcelscan_domain::ChatCompleter;
///
/// let completer = MockCompleter::new("ok");
/// completer.push_err("connection reset");
/// completer.push_ok("recovered");
///
/// assert!(completer.complete("p").is_err());
/// assert_eq!(completer.complete("p").unwrap(), "recovered");
/// assert_eq!(completer.complete("p").unwrap(), "ok");
/// assert_eq!(completer.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockCompleter {
    default: Result<String, String>,
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockCompleter {
    /// Create a mock that returns `response` for every unscripted call.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default: Ok(response.into()),
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose every unscripted call fails, simulating total
    /// service unavailability.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            default: Err(message.into()),
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a successful scripted response.
    pub fn push_ok(&self, response: impl Into<String>) {
        self.script.lock().unwrap().push_back(Ok(response.into()));
    }

    /// Queue a failing scripted response.
    pub fn push_err(&self, message: impl Into<String>) {
        self.script.lock().unwrap().push_back(Err(message.into()));
    }

    /// Number of times `complete` was called across all handles.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl ChatCompleter for MockCompleter {
    type Error = CompleterError;

    fn complete(&self, _prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default.clone());

        step.map_err(CompleterError::Communication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_default_response() {
        let completer = MockCompleter::new("fixed");
        assert_eq!(completer.complete("a").unwrap(), "fixed");
        assert_eq!(completer.complete("b").unwrap(), "fixed");
        assert_eq!(completer.call_count(), 2);
    }

    #[test]
    fn test_mock_script_consumed_in_order() {
        let completer = MockCompleter::new("default");
        completer.push_ok("first");
        completer.push_ok("second");

        assert_eq!(completer.complete("p").unwrap(), "first");
        assert_eq!(completer.complete("p").unwrap(), "second");
        assert_eq!(completer.complete("p").unwrap(), "default");
    }

    #[test]
    fn test_mock_scripted_failure() {
        let completer = MockCompleter::new("ok");
        completer.push_err("boom");

        let err = completer.complete("p").unwrap_err();
        assert!(matches!(err, CompleterError::Communication(_)));
        assert_eq!(completer.complete("p").unwrap(), "ok");
    }

    #[test]
    fn test_mock_unavailable() {
        let completer = MockCompleter::unavailable("down");
        assert!(completer.complete("p").is_err());
        assert!(completer.complete("p").is_err());
        assert_eq!(completer.call_count(), 2);
    }

    #[test]
    fn test_mock_clone_shares_state() {
        let completer = MockCompleter::new("ok");
        let clone = completer.clone();

        clone.complete("p").unwrap();
        assert_eq!(completer.call_count(), 1);
    }
}
