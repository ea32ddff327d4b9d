//! Configuration for the field extractor

use serde::{Deserialize, Serialize};

/// Configuration for the field extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum number of document characters included in one extraction
    /// prompt; longer text is truncated
    pub max_prompt_chars: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_prompt_chars == 0 {
            return Err("max_prompt_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: 3000,
        }
    }
}
