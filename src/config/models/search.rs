//! Search configuration

use serde::{Deserialize, Serialize};

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size used when the request does not specify one
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    /// Largest page size a caller may request
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
    /// Longest accepted search text, in characters
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl SearchConfig {
    /// Validate search configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_limit == 0 {
            return Err("Default limit must be greater than 0".to_string());
        }
        if self.max_limit < self.default_limit {
            return Err("Max limit cannot be smaller than the default limit".to_string());
        }
        if self.max_query_length == 0 {
            return Err("Max query length must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn default_limit() -> u32 {
    20
}

fn default_max_limit() -> u32 {
    100
}

fn default_max_query_length() -> usize {
    200
}
