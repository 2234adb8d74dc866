//! Mock mail provider for deterministic testing

use parcelscan_domain::{MailProvider, MessagePage, RawMessage};
use thiserror::Error;

/// Errors from the mock provider
#[derive(Error, Debug)]
pub enum MockMailError {
    /// No message with the requested id
    #[error("message not found: {0}")]
    NotFound(String),

    /// Simulated provider outage
    #[error("provider unavailable")]
    Unavailable,
}

/// In-memory mail provider backed by a fixed message list.
///
/// Listing is paged with stringified-offset continuation tokens, matching
/// the shape real providers use.
#[derive(Debug, Clone)]
pub struct MockMailProvider {
    messages: Vec<RawMessage>,
    page_size: usize,
    fail_listing: bool,
}

impl MockMailProvider {
    /// Create a provider serving the given messages, newest first.
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            messages,
            page_size: 25,
            fail_listing: false,
        }
    }

    /// Set the page size for listings.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Make every listing call fail, simulating an unreachable provider.
    pub fn failing() -> Self {
        Self {
            messages: Vec::new(),
            page_size: 25,
            fail_listing: true,
        }
    }
}

impl MailProvider for MockMailProvider {
    type Error = MockMailError;

    fn list_messages(
        &self,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<MessagePage, Self::Error> {
        if self.fail_listing {
            return Err(MockMailError::Unavailable);
        }

        let start: usize = page_token.and_then(|t| t.parse().ok()).unwrap_or(0);
        let count = self.page_size.min(max_results);
        let end = (start + count).min(self.messages.len());

        let ids = self.messages[start.min(end)..end]
            .iter()
            .map(|m| m.id.clone())
            .collect();

        let next_page_token = if end < self.messages.len() {
            Some(end.to_string())
        } else {
            None
        };

        Ok(MessagePage {
            ids,
            next_page_token,
        })
    }

    fn get_message(&self, id: &str) -> Result<RawMessage, Self::Error> {
        self.messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| MockMailError::NotFound(id.to_string()))
    }
}
