//! Defines the HTTP routes for user accounts.
//!
//! Registration is open. Update and delete require a verified token, and the
//! handlers additionally confirm the session behind it is still live.

use super::handlers::{create_user, delete_user, update_user};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, post, put},
};

pub fn user_router() -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route(
            "/users",
            put(update_user).layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/users",
            delete(delete_user).layer(middleware::from_fn(jwt_auth)),
        )
}
