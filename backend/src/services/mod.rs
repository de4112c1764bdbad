//! Module for core business logic services.
//!
//! Services orchestrate the stores and external checks behind the user
//! endpoints. Session logic lives next to its handlers in `auth`.

pub mod breach_service;
pub mod user_service;
