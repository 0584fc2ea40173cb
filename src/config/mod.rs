//! Configuration management for the scope service
//!
//! This module handles loading, validation, and management of all service configuration.

mod loader;
pub mod models;

pub use models::*;

use crate::utils::error::{FixzitError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FixzitError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml_str(&content)?;
        config.service.apply_env_overrides()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let service: ServiceConfig = serde_yaml::from_str(content)
            .map_err(|e| FixzitError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self { service })
    }

    /// Load configuration from defaults and environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut service = ServiceConfig::default();
        service.apply_env_overrides()?;

        let config = Self { service };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.service.server
    }

    /// Get session token configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.service.auth
    }

    /// Get search configuration
    pub fn search(&self) -> &SearchConfig {
        &self.service.search
    }

    /// Get SLA configuration
    pub fn sla(&self) -> &SlaConfig {
        &self.service.sla
    }

    /// Get PII protection configuration
    pub fn security(&self) -> &SecurityConfig {
        &self.service.security
    }

    /// Get rate limiting configuration
    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.service.rate_limit
    }

    /// Get document store configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.service.storage
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.service.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        let sections: [(&str, std::result::Result<(), String>); 8] = [
            ("Server", self.service.server.validate()),
            ("Auth", self.service.auth.validate()),
            ("Search", self.service.search.validate()),
            ("SLA", self.service.sla.validate()),
            ("Security", self.service.security.validate()),
            ("Rate limit", self.service.rate_limit.validate()),
            ("Storage", self.service.storage.validate()),
            ("Logging", self.service.logging.validate()),
        ];

        for (section, outcome) in sections {
            outcome.map_err(|e| FixzitError::Config(format!("{} config error: {}", section, e)))?;
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.service)
            .map_err(|e| FixzitError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
