//! Module for user account API endpoints.
//!
//! Creating a user is open; updating and deleting act on the caller's own
//! account and require a verified, still-live session.

pub mod handlers;
pub mod models;
pub mod routes;
