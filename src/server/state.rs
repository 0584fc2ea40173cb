//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::pii::PiiGuard;
use crate::search::SearchService;
use crate::server::middleware::ClientRateLimiter;
use crate::sla::SlaPolicy;
use crate::storage::DocumentStore;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Everything is read-only after construction and wrapped in `Arc` so the
/// state can be cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,
    /// Session token verification and RBAC
    pub auth: Arc<AuthSystem>,
    /// Scoped search
    pub search: Arc<SearchService>,
    /// SLA policy built from the configured work week
    pub sla: Arc<SlaPolicy>,
    /// Backing document store
    pub store: Arc<dyn DocumentStore>,
    /// Per-client limiter, absent when rate limiting is disabled
    pub rate_limiter: Option<Arc<ClientRateLimiter>>,
}

impl AppState {
    /// Wire the services for `config` on top of `store`
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let auth = AuthSystem::new(config.auth());
        let pii = PiiGuard::new(config.security())?;
        let sla = SlaPolicy::from_config(config.sla())?;
        let rate_limiter = ClientRateLimiter::from_config(config.rate_limit()).map(Arc::new);

        let search = SearchService::new(
            Arc::clone(&store),
            Arc::clone(auth.rbac()),
            Arc::new(pii),
            config.search().clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            search: Arc::new(search),
            sla: Arc::new(sla),
            store,
            rate_limiter,
        })
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
