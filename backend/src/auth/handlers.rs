//! Handler functions for session endpoints.
//!
//! `POST /sessions` logs a user in and `DELETE /sessions` logs the current
//! session out. Both delegate to [`AuthService`].

use crate::api::common::{error_response, malformed_body, service_error_to_http};
use crate::auth::models::{LoginRequest, LoginResponse, VerifiedIdentity};
use crate::auth::service::AuthService;
use crate::errors::ServiceError;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
    response::{Json as ResponseJson, Response},
};

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ResponseJson<LoginResponse>, Response> {
    let Json(payload) = payload.map_err(malformed_body)?;

    match AuthService::new(&state).login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(login_error_to_http(error)),
    }
}

/// Handle logout of the session named by the verified token
#[axum::debug_handler]
pub async fn logout(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
) -> Result<StatusCode, Response> {
    match AuthService::new(&state).logout(&identity).await {
        Ok(_) => Ok(StatusCode::OK),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Login reports an unknown email as a server-side failure with its detail.
fn login_error_to_http(error: ServiceError) -> Response {
    match error {
        ServiceError::NotFound { .. } => {
            tracing::warn!("Login failed: {}", error);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
        other => service_error_to_http(other),
    }
}
