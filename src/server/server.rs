//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::server::middleware::{AuthMiddleware, RateLimitMiddleware, RequestIdMiddleware};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::create_store;
use crate::utils::error::{FixzitError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::time::Duration;
use tracing::{debug, info};
use tracing_actix_web::TracingLogger;

const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, loading the configured document store
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let store = create_store(config.storage()).await?;
        let state = AppState::new(config.clone(), store)?;

        Ok(Self::with_state(state))
    }

    /// Create a server around prepared state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.server().clone(),
            state,
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        info!("Setting up routes and middleware");

        let cors = Self::build_cors(state.config.server());
        let max_body_size = state.config.server().max_body_size;

        App::new()
            .app_data(state)
            .app_data(
                web::JsonConfig::default()
                    .limit(max_body_size)
                    .error_handler(|err, _| FixzitError::bad_request(err.to_string()).into()),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, _| FixzitError::bad_request(err.to_string()).into()),
            )
            .wrap(AuthMiddleware)
            .wrap(RateLimitMiddleware)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .wrap(DefaultHeaders::new().add(("Server", "Fixzit-Scope")))
            .configure(routes::health::configure_routes)
            .configure(routes::search::configure_routes)
            .configure(routes::sla::configure_routes)
    }

    fn build_cors(server: &ServerConfig) -> Cors {
        let cors_config = &server.cors;
        let mut cors = Cors::default();

        if !cors_config.enabled {
            return cors;
        }

        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        let methods: Vec<actix_web::http::Method> = cors_config
            .allowed_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();
        if !methods.is_empty() {
            cors = cors.allowed_methods(methods);
        }

        let headers: Vec<actix_web::http::header::HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }

        cors = cors.max_age(cors_config.max_age as usize);

        if cors_config.allow_credentials {
            cors = cors.supports_credentials();
        }
        cors
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();
        let timeout = Duration::from_secs(self.config.timeout);

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        if let Some(limiter) = self.state.rate_limiter.clone() {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP_INTERVAL);
                loop {
                    interval.tick().await;
                    limiter.retain_recent();
                    debug!(clients = limiter.tracked_clients(), "Rate limiter state pruned");
                }
            });
        }

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .client_request_timeout(timeout)
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| FixzitError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    fn format_bind_error(error: std::io::Error, bind_addr: &str) -> FixzitError {
        match error.kind() {
            std::io::ErrorKind::AddrInUse => FixzitError::config(format!(
                "Address {} is already in use; set server.port or FIXZIT_PORT",
                bind_addr
            )),
            std::io::ErrorKind::PermissionDenied => FixzitError::config(format!(
                "Permission denied binding to {}",
                bind_addr
            )),
            _ => FixzitError::internal(format!("Failed to bind to {}: {}", bind_addr, error)),
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
