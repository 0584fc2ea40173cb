//! Authentication middleware

use crate::auth::SessionActor;
use crate::server::AppState;
use crate::server::middleware::helpers::{extract_auth_method, is_public_route};
use crate::utils::error::FixzitError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::Method;
use actix_web::{HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

/// Auth middleware for Actix-web
///
/// Verifies the bearer session token on protected routes and stores the
/// resulting [`SessionActor`] in the request extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_route(req.path()) || *req.method() == Method::OPTIONS {
            return Box::pin(self.service.call(req));
        }

        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            let err = FixzitError::internal("Application state is not configured");
            return Box::pin(async move { Err(err.into()) });
        };

        let auth_method = extract_auth_method(req.headers());
        match state.auth.authenticate(&auth_method) {
            Ok(actor) => {
                debug!(user_id = actor.id(), path = req.path(), "Session accepted");
                req.extensions_mut().insert(actor);
                Box::pin(self.service.call(req))
            }
            Err(e) => {
                warn!(path = req.path(), error = %e, "Rejected unauthenticated request");
                Box::pin(async move { Err(e.into()) })
            }
        }
    }
}

/// Session actor attached by [`AuthMiddleware`]
pub fn get_session_actor(req: &HttpRequest) -> Result<SessionActor, FixzitError> {
    req.extensions()
        .get::<SessionActor>()
        .cloned()
        .ok_or_else(|| FixzitError::auth("Missing session"))
}
