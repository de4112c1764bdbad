//! Defines the HTTP routes for sessions.
//!
//! Logout does not re-read the session before acting: the soft delete only
//! touches a live row, so a stale token can at worst end nothing.

use crate::auth::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, post},
};

/// Creates the session router (login and logout)
pub fn session_router() -> Router {
    Router::new()
        .route("/sessions", post(login))
        .route(
            "/sessions",
            delete(logout).layer(middleware::from_fn(jwt_auth)),
        )
}
