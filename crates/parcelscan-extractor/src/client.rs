//! The extraction client

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::parser::parse_extraction_response;
use crate::prompt::build_prompt;
use parcelscan_domain::{ChatCompleter, RecordDraft};
use parcelscan_llm::retry_with_backoff;
use std::sync::Arc;
use tracing::debug;

/// Turns a message's subject and body into a validated [`RecordDraft`] via
/// the extraction service.
///
/// Transport failures are retried with exponential backoff up to the
/// configured limit; parse failures are terminal for the item. A fixed
/// post-call delay follows every successful service call, independent of
/// retry backoff.
pub struct ExtractionClient<C: ChatCompleter> {
    completer: Arc<C>,
    config: ExtractionConfig,
}

impl<C> ExtractionClient<C>
where
    C: ChatCompleter + Send + Sync + 'static,
    C::Error: std::fmt::Display,
{
    /// Create a new extraction client.
    pub fn new(completer: C, config: ExtractionConfig) -> Self {
        Self {
            completer: Arc::new(completer),
            config,
        }
    }

    /// Access the configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract delivery details from one message.
    pub async fn extract(&self, subject: &str, body: &str) -> Result<RecordDraft, ExtractError> {
        let prompt = build_prompt(subject, body);
        debug!("prompt length: {} chars", prompt.len());

        let response = retry_with_backoff(
            self.config.retry_limit,
            self.config.retry_base_delay(),
            || {
                let completer = Arc::clone(&self.completer);
                let prompt = prompt.clone();
                async move {
                    // The completer is a blocking call; run it off the
                    // async executor.
                    match tokio::task::spawn_blocking(move || {
                        completer.complete(&prompt).map_err(|e| e.to_string())
                    })
                    .await
                    {
                        Ok(result) => result,
                        Err(e) => Err(format!("task join error: {}", e)),
                    }
                }
            },
        )
        .await
        .map_err(ExtractError::ServiceUnavailable)?;

        debug!("response length: {} chars", response.len());

        // Rate-limit backpressure: the service answered, so pace the next
        // call regardless of whether this response parses.
        tokio::time::sleep(self.config.post_call_delay()).await;

        parse_extraction_response(&response)
    }
}
