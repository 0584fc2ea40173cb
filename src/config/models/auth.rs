//! Session token configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens
    #[serde(default = "generate_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// Expected token issuer
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Expected token audience
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secret(),
            jwt_expiration: default_jwt_expiration(),
            issuer: default_issuer(),
            audience: default_audience(),
        }
    }
}

impl AuthConfig {
    /// Validate session token configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err("JWT secret must not use default values".to_string());
        }

        if self.jwt_secret.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(
                "JWT secret should contain mixed case letters, numbers, and special characters"
                    .to_string(),
            );
        }

        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err("JWT expiration should not exceed 30 days".to_string());
        }

        if self.issuer.trim().is_empty() {
            return Err("Token issuer cannot be empty".to_string());
        }

        if self.audience.trim().is_empty() {
            return Err("Token audience cannot be empty".to_string());
        }

        Ok(())
    }
}

fn default_jwt_expiration() -> u64 {
    8 * 3600
}

fn default_issuer() -> String {
    "fixzit".to_string()
}

fn default_audience() -> String {
    "fixzit-api".to_string()
}
