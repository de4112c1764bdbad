//! Authentication module for sessions and request identity.
//!
//! This module provides login and logout, the token middleware that protects
//! routes, and the live-session check used by sensitive mutations.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
