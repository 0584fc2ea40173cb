//! HTTP middleware implementations
//!
//! - Session authentication for protected routes
//! - Per-client rate limiting
//! - Request ID tracking

mod auth;
mod helpers;
mod rate_limit;
mod request_id;


pub use auth::{AuthMiddleware, AuthMiddlewareService, get_session_actor};
pub use helpers::{client_identifier, extract_auth_method, is_public_route};
pub use rate_limit::{ClientRateLimiter, RateLimitMiddleware, RateLimitMiddlewareService};
pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware, RequestIdMiddlewareService};
