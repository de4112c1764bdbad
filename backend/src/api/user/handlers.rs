//! Handler functions for the user account endpoints.
//!
//! Each handler unwraps the request, delegates to [`UserService`] and renders
//! the resulting user (never its password hash) as JSON.

use super::models::{CreateUserRequest, UpdateUserRequest};
use crate::api::common::{malformed_body, service_error_to_http};
use crate::auth::models::VerifiedIdentity;
use crate::database::models::User;
use crate::services::user_service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    response::{Json as ResponseJson, Response},
};

/// Registers a new user.
#[axum::debug_handler]
pub async fn create_user(
    Extension(state): Extension<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ResponseJson<User>, Response> {
    let Json(payload) = payload.map_err(malformed_body)?;

    UserService::new(&state)
        .create_user(payload)
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}

/// Applies a partial update to the caller's account.
#[axum::debug_handler]
pub async fn update_user(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ResponseJson<User>, Response> {
    let Json(payload) = payload.map_err(malformed_body)?;

    tracing::debug!("Updating user {}", identity.user_id);

    UserService::new(&state)
        .update_user(&identity, payload)
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}

/// Soft-deletes the caller's account.
#[axum::debug_handler]
pub async fn delete_user(
    Extension(state): Extension<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
) -> Result<ResponseJson<User>, Response> {
    UserService::new(&state)
        .delete_user(&identity)
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}
