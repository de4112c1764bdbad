//! Data structures for authentication-related entities.
//!
//! This module defines the login payloads and the verified identity that the
//! token middleware hands to protected handlers.

use crate::utils::jwt::Claims;
use serde::{Deserialize, Serialize};

/// Login request payload. Missing fields deserialize as empty strings.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response containing the signed session token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Identity proven by a valid token.
///
/// Only `auth::middleware::jwt_auth` creates this, so its presence in the
/// request extensions means the token was verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: String,
    pub session_id: String,
}

impl From<Claims> for VerifiedIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            session_id: claims.sid,
        }
    }
}
