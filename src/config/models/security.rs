//! PII protection configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// PII protection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Secret the field-encryption key is derived from
    ///
    /// Required, and must stay stable across restarts.
    #[serde(default)]
    pub pii_key: String,
    /// Mask protected fields in search results
    #[serde(default = "default_true")]
    pub mask_search_results: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            pii_key: String::new(),
            mask_search_results: true,
        }
    }
}

impl SecurityConfig {
    /// Validate PII protection configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.pii_key.trim().is_empty() {
            return Err("PII key is required (security.pii_key or FIXZIT_PII_KEY)".to_string());
        }
        if self.pii_key.len() < 32 {
            return Err("PII key must be at least 32 characters long".to_string());
        }

        if !self.mask_search_results {
            warn!("PII masking of search results is disabled");
        }

        Ok(())
    }
}
