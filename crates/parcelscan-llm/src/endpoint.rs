//! Chat-completions endpoint
//!
//! Speaks the hosted extraction service's wire shape: a POST carrying
//! `{messages, max_tokens, temperature, top_p, frequency_penalty,
//! presence_penalty}` with an `api-key` header, answered by
//! `{choices: [{message: {content}}]}`. Endpoint URL and key are injected
//! configuration, never hardcoded.
//!
//! One call performs one attempt; callers wrap it in
//! [`retry_with_backoff`](crate::retry_with_backoff) as needed.

use crate::CompleterError;
use parcelscan_domain::ChatCompleter;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default timeout for a single request
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default token budget for structured extraction output
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Default sampling temperature; low to bias toward deterministic JSON
pub const DEFAULT_TEMPERATURE: f64 = 0.5;

/// HTTPS chat-completions client for the extraction service.
pub struct ChatEndpoint {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl ChatEndpoint {
    /// Create a new endpoint client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, CompleterError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| CompleterError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        })
    }

    /// Set the per-call token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Send a prompt and return the first choice's content.
    ///
    /// # Errors
    ///
    /// - [`CompleterError::Communication`] on transport failure
    /// - [`CompleterError::Status`] on a non-success HTTP status
    /// - [`CompleterError::InvalidResponse`] when the body does not carry a
    ///   usable choice
    pub async fn complete_async(&self, prompt: &str) -> Result<String, CompleterError> {
        let request_body = ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
        };

        debug!("posting extraction request, prompt length {}", prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompleterError::Communication(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(CompleterError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompleterError::InvalidResponse(format!("failed to parse body: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CompleterError::InvalidResponse("response had no choices".to_string()))?;

        Ok(content.trim().to_string())
    }
}

impl ChatCompleter for ChatEndpoint {
    type Error = CompleterError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper; callers invoke this off the async runtime, e.g.
        // via spawn_blocking.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CompleterError::Other(format!("failed to build runtime: {}", e)))?;

        runtime.block_on(self.complete_async(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_defaults() {
        let endpoint = ChatEndpoint::new("https://example.test/chat", "secret").unwrap();
        assert_eq!(endpoint.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(endpoint.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(endpoint.top_p, 1.0);
        assert_eq!(endpoint.frequency_penalty, 0.0);
        assert_eq!(endpoint.presence_penalty, 0.0);
    }

    #[test]
    fn test_endpoint_builders() {
        let endpoint = ChatEndpoint::new("https://example.test/chat", "secret")
            .unwrap()
            .with_max_tokens(512)
            .with_temperature(0.0);
        assert_eq!(endpoint.max_tokens, 512);
        assert_eq!(endpoint.temperature, 0.0);
    }

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: "extract this",
            }],
            max_tokens: 300,
            temperature: 0.5,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "extract this");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["top_p"], 1.0);
    }

    #[test]
    fn test_response_wire_shape() {
        let body = r#"{"choices": [{"message": {"content": "{\"delivery\": \"yes\"}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].message.content, r#"{"delivery": "yes"}"#);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let endpoint = ChatEndpoint::new("http://127.0.0.1:1/chat", "secret").unwrap();
        let result = endpoint.complete_async("test").await;
        assert!(matches!(result, Err(CompleterError::Communication(_))));
    }
}
