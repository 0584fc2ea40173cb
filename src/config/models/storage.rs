//! Document store configuration

use serde::{Deserialize, Serialize};

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// JSON file with `{ "collection": [documents] }` loaded at startup
    #[serde(default)]
    pub seed_path: Option<String>,
}

impl StorageConfig {
    /// Validate document store configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.seed_path {
            if path.trim().is_empty() {
                return Err("Seed path cannot be empty when set".to_string());
            }
            if !std::path::Path::new(path).exists() {
                return Err(format!("Seed file not found: {}", path));
            }
        }
        Ok(())
    }
}
