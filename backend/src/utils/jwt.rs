//! JWT token utilities for session-bound identity tokens.
//!
//! Tokens are HS512-signed and carry the user id as `sub` and the session id
//! as `sid`. Verification is purely cryptographic: it never touches storage,
//! so a token outlives a logout until its own `exp`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// Value of the `iss` claim on every token this service issues.
pub const TOKEN_ISSUER: &str = "accounts-backend";

/// JWT claims binding a token to one user and one session.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// User ID
    pub sub: String,
    /// Session ID
    pub sid: String,
    /// Not valid before (seconds since epoch)
    pub nbf: i64,
    /// Issued at
    pub iat: i64,
    /// Expiry, mirrors the session's `expires_at`
    pub exp: i64,
}

/// Signs tokens with the current secret and verifies against the full key set.
pub struct JwtUtils {
    encoding_key: EncodingKey,
    /// Current secret first, then retired ones.
    decoding_keys: Vec<DecodingKey>,
    validation: Validation,
}

impl JwtUtils {
    /// Builds the key set from the startup configuration.
    pub fn new(config: &Config) -> ServiceResult<Self> {
        Self::from_secrets(&config.jwt_secret, &config.jwt_previous_secrets)
    }

    pub fn from_secrets(secret: &str, previous_secrets: &[String]) -> ServiceResult<Self> {
        if secret.is_empty() {
            return Err(ServiceError::internal_error("JWT signing secret is not set"));
        }

        let decoding_keys = std::iter::once(secret)
            .chain(previous_secrets.iter().map(String::as_str))
            .filter(|s| !s.is_empty())
            .map(|s| DecodingKey::from_secret(s.as_bytes()))
            .collect();

        // Time bounds are checked against an explicit clock in `validate_token_at`.
        let mut validation = Validation::new(Algorithm::HS512);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);

        Ok(JwtUtils {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_keys,
            validation,
        })
    }

    /// Issues a token for a freshly created session.
    ///
    /// Claims hold whole seconds, so callers pass second-aligned instants for
    /// the token window to match the session exactly.
    pub fn issue_token(
        &self,
        user_id: &str,
        session_id: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            nbf: issued_at.timestamp(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::encoding(format!("Token generation failed: {}", e)))
    }

    /// Validates and decodes a token against the current time.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validates a token as of `now`: signature under any registered key,
    /// issuer, and `nbf <= now < exp`.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> ServiceResult<Claims> {
        for key in &self.decoding_keys {
            match decode::<Claims>(token, key, &self.validation) {
                Ok(token_data) => return check_time_window(token_data.claims, now),
                // Possibly signed with a different registered key
                Err(e) if matches!(e.kind(), ErrorKind::InvalidSignature) => continue,
                Err(e) => {
                    return Err(ServiceError::authentication(format!(
                        "Token validation failed: {}",
                        e
                    )));
                }
            }
        }

        Err(ServiceError::authentication(
            "Token validation failed: InvalidSignature",
        ))
    }
}

fn check_time_window(claims: Claims, now: DateTime<Utc>) -> ServiceResult<Claims> {
    let now = now.timestamp();
    if claims.nbf > now {
        return Err(ServiceError::authentication("Token is not valid yet"));
    }
    if now >= claims.exp {
        return Err(ServiceError::authentication("Token has expired"));
    }
    Ok(claims)
}
