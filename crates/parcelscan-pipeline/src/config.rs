//! Pipeline configuration

use serde::{Deserialize, Serialize};

/// Tuning knobs for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum candidate messages fetched per run
    pub max_results: usize,

    /// Items per extraction batch; bounds peak resource use and paces
    /// progress checkpoints
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_results: 100,
            batch_size: 10,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        Ok(())
    }
}
