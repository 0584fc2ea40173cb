//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::storage::DocumentStore;
use crate::utils::error::{FixzitError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `store` instead of the one described by the storage config
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| FixzitError::Config("Configuration is required".to_string()))?;

        match self.store {
            Some(store) => Ok(HttpServer::with_state(AppState::new(config, store)?)),
            None => HttpServer::new(&config).await,
        }
    }
}

/// Build and run the server for `config` until it shuts down
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting {} v{}", crate::NAME, crate::VERSION);

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Server starting at: http://{}", server.config().address());
    info!("API endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/search - Scoped search");
    info!("   POST /api/sla/due-date - SLA due date");

    server.start().await
}
