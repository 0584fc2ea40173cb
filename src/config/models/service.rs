//! Top-level service configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Service configuration as it appears in the YAML file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Session token configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Search configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// SLA calendar configuration
    #[serde(default)]
    pub sla: SlaConfig,
    /// PII protection configuration
    #[serde(default)]
    pub security: SecurityConfig,
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Document store configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
