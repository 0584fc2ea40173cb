//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Per-client rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sustained requests per minute per client
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
    /// Requests a client may burst above the sustained rate
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_minute: default_requests_per_minute(),
            burst: default_burst(),
        }
    }
}

impl RateLimitConfig {
    /// Validate rate limiting configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled {
            if self.requests_per_minute == 0 {
                return Err("Requests per minute must be greater than 0".to_string());
            }
            if self.burst == 0 {
                return Err("Burst must be greater than 0".to_string());
            }
        }
        Ok(())
    }
}

fn default_requests_per_minute() -> u32 {
    120
}

fn default_burst() -> u32 {
    20
}
