//! Rate limiting middleware

use crate::config::RateLimitConfig;
use crate::server::middleware::helpers::client_identifier;
use crate::server::state::AppState;
use crate::utils::error::FixzitError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::web;
use futures::future::{Ready, ready};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::future::Future;
use std::num::NonZeroU32;
use std::pin::Pin;
use tracing::{debug, warn};

/// Keyed token-bucket limiter shared by all workers
pub struct ClientRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
}

impl std::fmt::Debug for ClientRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRateLimiter")
            .field("tracked_clients", &self.limiter.len())
            .finish()
    }
}

impl ClientRateLimiter {
    /// Build a limiter, or `None` when rate limiting is disabled
    pub fn from_config(config: &RateLimitConfig) -> Option<Self> {
        if !config.enabled {
            debug!("Rate limiting disabled");
            return None;
        }

        let rate = NonZeroU32::new(config.requests_per_minute)?;
        let burst = NonZeroU32::new(config.burst).unwrap_or(rate);
        let quota = Quota::per_minute(rate).allow_burst(burst);

        Some(Self {
            limiter: RateLimiter::keyed(quota),
        })
    }

    /// Take one request from `client`'s budget
    pub fn check(&self, client: &str) -> crate::utils::error::Result<()> {
        self.limiter.check_key(&client.to_string()).map_err(|_| {
            FixzitError::rate_limit("Too many requests, please retry later")
        })
    }

    /// Drop state for clients whose buckets have refilled
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Rate limit middleware for Actix-web
pub struct RateLimitMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService { service }))
    }
}

/// Service implementation for rate limit middleware
pub struct RateLimitMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future =
        Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let limiter = req
            .app_data::<web::Data<AppState>>()
            .and_then(|state| state.rate_limiter.clone());

        if let Some(limiter) = limiter {
            let client = client_identifier(&req);
            if let Err(e) = limiter.check(&client) {
                warn!(client = %client, path = req.path(), "Rate limit exceeded");
                return Box::pin(async move { Err(e.into()) });
            }
        }

        Box::pin(self.service.call(req))
    }
}
