//! Global application error types.
//!
//! Every failure in the service layer is expressed as a [`ServiceError`]. The
//! variants follow the categories the HTTP boundary distinguishes, so the
//! mapping in `api::common` can translate each one to exactly one status code.

use thiserror::Error;

/// Generic service error shared by the auth, user and session flows.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad or missing input supplied by the caller.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The request body could not be parsed at all.
    #[error("Malformed request body")]
    MalformedRequest,

    /// Bad credentials, or a missing/invalid/expired token or session.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    /// Storage backend failure.
    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    /// Failure talking to an external dependency such as the breach corpus.
    #[error("External service error: {message}")]
    ExternalService { message: String },

    /// Token signing failure.
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn external_service(message: impl Into<String>) -> Self {
        Self::ExternalService {
            message: message.into(),
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
