//! HTTP response handling for errors

use super::types::FixzitError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl FixzitError {
    /// Status code and stable error code for this error
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            FixzitError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            FixzitError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            FixzitError::Auth(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR"),
            FixzitError::Jwt(_) => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            FixzitError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            FixzitError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            FixzitError::RateLimit(_) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            FixzitError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            FixzitError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            FixzitError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            FixzitError::Crypto(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CRYPTO_ERROR"),
            FixzitError::Serialization(_) | FixzitError::Yaml(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR")
            }
            FixzitError::Io(_) | FixzitError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl ResponseError for FixzitError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        self.response_with_request_id(None)
    }
}

impl FixzitError {
    /// Error response carrying the id of the request that failed
    pub fn response_with_request_id(&self, request_id: Option<&str>) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();

        // Server-side failures never leak their details to the caller
        let message = if status_code.is_server_error() {
            match self {
                FixzitError::ServiceUnavailable(_) => self.to_string(),
                _ => "An internal error occurred".to_string(),
            }
        } else {
            self.to_string()
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: request_id.map(str::to_string),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
