//! Middleware for protecting authenticated routes.
//!
//! `jwt_auth` turns a bearer token into a [`VerifiedIdentity`]. Every failure
//! (missing header, wrong scheme, bad signature, expired, not yet valid) is
//! reported to the client as the same bare 401.

use crate::auth::models::VerifiedIdentity;
use crate::state::AppState;
use axum::{
    Extension,
    extract::Request,
    http::{
        HeaderMap, HeaderName, HeaderValue, StatusCode,
        header::AUTHORIZATION,
    },
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Verified user id, set only by `jwt_auth`.
pub const VERIFIED_USER_HEADER: HeaderName = HeaderName::from_static("x-verified-user-uuid");
/// Verified session id, set only by `jwt_auth`.
pub const VERIFIED_SESSION_HEADER: HeaderName =
    HeaderName::from_static("x-verified-session-uuid");

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        debug!("Rejected request without a bearer token");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = state.jwt.validate_token(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        StatusCode::UNAUTHORIZED
    })?;
    let identity = VerifiedIdentity::from(claims);

    let user_value =
        HeaderValue::from_str(&identity.user_id).map_err(|_| StatusCode::UNAUTHORIZED)?;
    let session_value =
        HeaderValue::from_str(&identity.session_id).map_err(|_| StatusCode::UNAUTHORIZED)?;

    // `insert` replaces anything the client sent under these names
    let headers = request.headers_mut();
    headers.insert(VERIFIED_USER_HEADER, user_value);
    headers.insert(VERIFIED_SESSION_HEADER, session_value);
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Drops client-supplied identity headers on every route.
pub async fn strip_identity_headers(mut request: Request, next: Next) -> Response {
    let headers = request.headers_mut();
    headers.remove(VERIFIED_USER_HEADER);
    headers.remove(VERIFIED_SESSION_HEADER);
    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
