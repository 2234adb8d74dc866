//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use parcelscan_extractor::ExtractionConfig;
use parcelscan_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration, stored at `~/.parcelscan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Extraction service connection
    #[serde(default)]
    pub extraction: ServiceSettings,

    /// Extraction tuning (token budget, retries, pacing)
    #[serde(default)]
    pub tuning: ExtractionConfig,

    /// Pipeline tuning (scan limit, batch size)
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Record database location
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Classifier vocabulary override
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Connection details for the extraction service.
///
/// The key is injected configuration; it is never written by default and
/// never logged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceSettings {
    /// Chat-completions endpoint URL
    #[serde(default)]
    pub endpoint: String,

    /// API key sent in the `api-key` header
    #[serde(default)]
    pub api_key: String,
}

/// Record database settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseSettings {
    /// Database file path; defaults to `~/.parcelscan/deliveries.db`
    #[serde(default)]
    pub path: Option<String>,
}

/// Classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClassifierSettings {
    /// Path to a TOML vocabulary file; built-in rules when unset
    #[serde(default)]
    pub rules_path: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the configuration directory path.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".parcelscan"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from the default location, or defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Resolve the record database path, creating its parent directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        let path = match &self.database.path {
            Some(p) => PathBuf::from(p),
            None => Self::dir()?.join("deliveries.db"),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert!(config.extraction.endpoint.is_empty());
        assert_eq!(config.pipeline.max_results, 100);
        assert_eq!(config.tuning.retry_limit, 3);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [extraction]
            endpoint = "https://example.test/chat"
            api_key = "secret"

            [pipeline]
            max_results = 50
            batch_size = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.extraction.endpoint, "https://example.test/chat");
        assert_eq!(config.pipeline.max_results, 50);
        assert_eq!(config.tuning.max_tokens, 300);
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_roundtrip() {
        let mut config = Config::default();
        config.database.path = Some("/tmp/test.db".to_string());
        config.classifier.rules_path = Some("/tmp/rules.toml".to_string());

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(loaded.database.path.as_deref(), Some("/tmp/test.db"));
        assert_eq!(loaded.classifier.rules_path.as_deref(), Some("/tmp/rules.toml"));
    }
}
