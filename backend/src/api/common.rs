//! Error handling utilities for API responses.
//!
//! Converts service-layer errors into HTTP responses. Failures the client can
//! act on carry a `{"message": ...}` body; authentication failures and
//! unparseable bodies are answered with a bare status code.
//!
//! # Status Mapping
//! - `Validation` → 400 with message
//! - `MalformedRequest` → 400, empty body
//! - `Authentication`, `NotFound` → 401, empty body
//! - `Database`, `ExternalService`, `Encoding`, `InternalError` → 500 with message

use crate::errors::ServiceError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Body of every non-empty error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Builds a `{"message": ...}` response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorMessage {
            message: message.into(),
        }),
    )
        .into_response()
}

/// Converts ServiceError to the HTTP response the API contract prescribes
pub fn service_error_to_http(error: ServiceError) -> Response {
    match error {
        ServiceError::Validation { message } => {
            tracing::debug!("Validation failed: {}", message);
            error_response(StatusCode::BAD_REQUEST, message)
        }
        ServiceError::MalformedRequest => StatusCode::BAD_REQUEST.into_response(),
        ServiceError::Authentication { message } => {
            tracing::debug!("Authentication failed: {}", message);
            StatusCode::UNAUTHORIZED.into_response()
        }
        // Identity-bound lookups must not reveal whether the record exists
        ServiceError::NotFound { entity, identifier } => {
            tracing::debug!("{} not found: {}", entity, identifier);
            StatusCode::UNAUTHORIZED.into_response()
        }
        error @ (ServiceError::Database { .. }
        | ServiceError::ExternalService { .. }
        | ServiceError::Encoding { .. }
        | ServiceError::InternalError { .. }) => {
            tracing::error!("Request failed: {}", error);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}

/// Maps any JSON extractor rejection to a bare 400.
pub fn malformed_body(rejection: JsonRejection) -> Response {
    tracing::debug!("Rejected request body: {}", rejection);
    service_error_to_http(ServiceError::MalformedRequest)
}
