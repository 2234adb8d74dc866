//! Mail provider backed by a JSON export file.
//!
//! The export is a JSON array of raw provider messages, the shape a mail
//! API dump produces: id, headers, snippet, and a base64url-encoded body.
//! Listing is paged with stringified-offset continuation tokens so the
//! pipeline exercises the same paging path it would against a live
//! provider.

use parcelscan_domain::{MailProvider, MessagePage, RawMessage};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors from the export provider.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export file could not be read
    #[error("failed to read export: {0}")]
    Io(#[from] std::io::Error),

    /// The export file is not a JSON array of messages
    #[error("failed to parse export: {0}")]
    Parse(#[from] serde_json::Error),

    /// No message with the requested id
    #[error("message not found: {0}")]
    NotFound(String),
}

/// Read-only mail provider over a JSON export file.
#[derive(Debug)]
pub struct JsonExportProvider {
    ids: Vec<String>,
    by_id: HashMap<String, RawMessage>,
}

impl JsonExportProvider {
    /// Load an export file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let messages: Vec<RawMessage> = serde_json::from_str(&contents)?;
        info!(
            "loaded {} messages from {}",
            messages.len(),
            path.as_ref().display()
        );
        Ok(Self::new(messages))
    }

    /// Build a provider over an in-memory message list.
    pub fn new(messages: Vec<RawMessage>) -> Self {
        let ids = messages.iter().map(|m| m.id.clone()).collect();
        let by_id = messages.into_iter().map(|m| (m.id.clone(), m)).collect();
        Self { ids, by_id }
    }
}

impl MailProvider for JsonExportProvider {
    type Error = ExportError;

    fn list_messages(
        &self,
        max_results: usize,
        page_token: Option<&str>,
    ) -> Result<MessagePage, Self::Error> {
        let start: usize = page_token.and_then(|t| t.parse().ok()).unwrap_or(0);
        let end = start.saturating_add(max_results.max(1)).min(self.ids.len());

        let ids = self.ids[start.min(end)..end].to_vec();
        let next_page_token = if end < self.ids.len() {
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
        self.by_id
            .get(id)
            .cloned()
            .ok_or_else(|| ExportError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_export_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "m1", "subject": "Your order shipped", "sender": "shop@example.com"}},
                {{"id": "m2"}}
            ]"#
        )
        .unwrap();

        let provider = JsonExportProvider::from_file(file.path()).unwrap();
        let page = provider.list_messages(10, None).unwrap();
        assert_eq!(page.ids, vec!["m1", "m2"]);
        assert!(page.next_page_token.is_none());

        let msg = provider.get_message("m1").unwrap();
        assert_eq!(msg.subject, "Your order shipped");
    }

    #[test]
    fn test_malformed_export_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = JsonExportProvider::from_file(file.path());
        assert!(matches!(result, Err(ExportError::Parse(_))));
    }

    #[test]
    fn test_paged_listing() {
        let messages: Vec<RawMessage> = (0..5)
            .map(|i| serde_json::from_value(serde_json::json!({"id": format!("m{}", i)})).unwrap())
            .collect();
        let provider = JsonExportProvider::new(messages);

        let page1 = provider.list_messages(2, None).unwrap();
        assert_eq!(page1.ids, vec!["m0", "m1"]);

        let token = page1.next_page_token.unwrap();
        let page2 = provider.list_messages(2, Some(&token)).unwrap();
        assert_eq!(page2.ids, vec!["m2", "m3"]);

        let token = page2.next_page_token.unwrap();
        let page3 = provider.list_messages(2, Some(&token)).unwrap();
        assert_eq!(page3.ids, vec!["m4"]);
        assert!(page3.next_page_token.is_none());
    }

    #[test]
    fn test_missing_message() {
        let provider = JsonExportProvider::new(vec![]);
        assert!(matches!(
            provider.get_message("nope"),
            Err(ExportError::NotFound(_))
        ));
    }
}
