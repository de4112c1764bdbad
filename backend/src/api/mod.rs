//! Central module for organizing the application's HTTP surface.
//!
//! Session routes live in `auth`; user routes live here. [`router`] stitches
//! them together with the layers every request passes through.

pub mod common;
pub mod user;

use crate::auth::middleware::strip_identity_headers;
use crate::auth::routes::session_router;
use crate::state::AppState;
use axum::{Extension, Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;

/// Builds the full application router around the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(session_router())
        .merge(user::routes::user_router())
        .layer(
            ServiceBuilder::new()
                .layer(Extension(state))
                .layer(middleware::from_fn(strip_identity_headers)),
        )
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
