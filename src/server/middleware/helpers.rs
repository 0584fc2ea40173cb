//! Helper functions for middleware

use crate::auth::{AuthMethod, JwtHandler};
use actix_web::dev::ServiceRequest;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Extract the authentication method from request headers
pub fn extract_auth_method(headers: &HeaderMap) -> AuthMethod {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(JwtHandler::extract_token_from_header)
        .map(|token| AuthMethod::Jwt(token.to_string()))
        .unwrap_or(AuthMethod::None)
}

/// Check if a route is public (doesn't require authentication)
pub fn is_public_route(path: &str) -> bool {
    const PUBLIC_ROUTES: &[&str] = &["/health"];

    PUBLIC_ROUTES.iter().any(|&route| path.starts_with(route))
}

/// Key a request by caller for rate limiting
///
/// Limiting runs before the credential is verified, so callers are keyed by
/// peer address only.
pub fn client_identifier(req: &ServiceRequest) -> String {
    let ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    format!("ip:{}", ip)
}
