//! Request ID middleware

use crate::utils::error::FixzitError;
use actix_web::body::{BoxBody, EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpResponse;
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, error};

/// Header carrying the request id on requests and responses
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_INCOMING_ID_LEN: usize = 128;

/// Request ID middleware for Actix-web
///
/// Keeps a well-formed incoming `x-request-id`, otherwise assigns a new one,
/// and echoes it on the response. Errors raised further in are rendered here
/// so their bodies and headers carry the id as well.
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestIdMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddlewareService { service }))
    }
}

/// Service implementation for request ID middleware
pub struct RequestIdMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let header = HeaderName::from_static(REQUEST_ID_HEADER);

        let incoming = req
            .headers()
            .get(&header)
            .and_then(|value| value.to_str().ok())
            .filter(|id| !id.is_empty() && id.len() <= MAX_INCOMING_ID_LEN)
            .and_then(|id| HeaderValue::from_str(id).ok());

        let request_id = match incoming {
            Some(value) => value,
            None => HeaderValue::from_str(&crate::utils::generate_request_id())
                .unwrap_or_else(|_| HeaderValue::from_static("invalid")),
        };

        req.headers_mut().insert(header.clone(), request_id.clone());
        debug!(request_id = ?request_id, "Processing request");

        let http_req = req.request().clone();
        let fut = self.service.call(req);
        Box::pin(async move {
            let id = request_id.to_str().ok().map(str::to_string);

            let mut res = match fut.await {
                Ok(res) => {
                    // Handler errors arrive already rendered, with the error attached
                    let rendered = res
                        .response()
                        .error()
                        .map(|e| render_error(e, id.as_deref()));
                    match rendered {
                        Some(response) => {
                            let (req, _) = res.into_parts();
                            ServiceResponse::new(req, response).map_into_right_body()
                        }
                        None => res.map_into_left_body(),
                    }
                }
                Err(e) => ServiceResponse::new(http_req, render_error(&e, id.as_deref()))
                    .map_into_right_body(),
            };

            res.headers_mut().insert(header, request_id);
            Ok(res)
        })
    }
}

fn render_error(err: &actix_web::Error, request_id: Option<&str>) -> HttpResponse<BoxBody> {
    match err.as_error::<FixzitError>() {
        Some(e) => {
            if !e.is_client_error() {
                error!(request_id = request_id.unwrap_or("-"), error = %e, "Request failed");
            }
            e.response_with_request_id(request_id)
        }
        None => err.error_response(),
    }
}
