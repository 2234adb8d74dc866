//! Configuration for the extraction client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for the extraction client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Token budget per extraction call
    pub max_tokens: u32,

    /// Sampling temperature; low values bias toward deterministic JSON
    pub temperature: f64,

    /// Maximum attempts per item for transport failures
    pub retry_limit: u32,

    /// Base backoff delay in seconds; doubles after each failed attempt
    pub retry_base_delay_s: f64,

    /// Fixed delay after every successful call, the rate-limit backpressure
    pub post_call_delay_s: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.5,
            retry_limit: 3,
            retry_base_delay_s: 1.0,
            post_call_delay_s: 1.0,
        }
    }
}

impl ExtractionConfig {
    /// Base backoff delay as a `Duration`.
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_secs_f64(self.retry_base_delay_s.max(0.0))
    }

    /// Post-call rate-limit delay as a `Duration`.
    pub fn post_call_delay(&self) -> Duration {
        Duration::from_secs_f64(self.post_call_delay_s.max(0.0))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if self.retry_limit == 0 {
            return Err("retry_limit must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be within [0.0, 2.0]".to_string());
        }
        if self.retry_base_delay_s < 0.0 || self.post_call_delay_s < 0.0 {
            return Err("delays must be non-negative".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_tokens, 300);
        assert_eq!(config.retry_limit, 3);
    }

    #[test]
    fn test_invalid_retry_limit() {
        let config = ExtractionConfig {
            retry_limit: 0,
            ..ExtractionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_delay_rejected() {
        let config = ExtractionConfig {
            post_call_delay_s: -1.0,
            ..ExtractionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = ExtractionConfig::from_toml(
            r#"
            max_tokens = 200
            temperature = 0.2
            retry_limit = 5
            retry_base_delay_s = 0.5
            post_call_delay_s = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.retry_limit, 5);
        assert_eq!(config.retry_base_delay(), Duration::from_millis(500));
        assert_eq!(config.post_call_delay(), Duration::from_secs(2));
    }
}
