//! Core business logic for the authentication system.

use crate::auth::models::{LoginRequest, LoginResponse, VerifiedIdentity};
use crate::database::models::Session;
use crate::errors::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::utils::password::verify_password;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use tracing::{debug, info};

/// Authentication service for handling login, logout and session checks
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        AuthService { state }
    }

    /// Verifies credentials, opens a session and signs a token for it.
    ///
    /// # Errors
    /// - `NotFound` if no live user has this email
    /// - `Authentication` if the password does not match
    /// - `Database` if the session cannot be stored
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let user = self
            .state
            .users
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &request.email))?;

        if !verify_password(&request.password, &user.password_hash) {
            debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(ServiceError::authentication("Invalid email or password"));
        }

        // Token times have second resolution, so the session window must too
        let issued_at = Utc::now().trunc_subsecs(0);
        let expires_at = self.session_expiry(issued_at)?;
        let session = self
            .state
            .sessions
            .create_session(&user.id, expires_at)
            .await?;

        let token =
            self.state
                .jwt
                .issue_token(&user.id, &session.id, issued_at, session.expires_at)?;

        info!(user_id = %user.id, session_id = %session.id, "Session created");
        Ok(LoginResponse { token })
    }

    /// Ends the session named by the verified token.
    ///
    /// Returns the affected row count; zero means the session was already gone.
    pub async fn logout(&self, identity: &VerifiedIdentity) -> ServiceResult<u64> {
        let affected = self
            .state
            .sessions
            .soft_delete_session_by_id(&identity.session_id)
            .await?;

        if affected == 0 {
            debug!(session_id = %identity.session_id, "Logout for a session that already ended");
        } else {
            info!(session_id = %identity.session_id, "Session ended");
        }
        Ok(affected)
    }

    /// Re-reads the session behind a token and rejects it unless it is still live.
    ///
    /// Tokens carry no revocation signal, so mutations that must honour a
    /// logout call this before acting.
    pub async fn require_live_session(&self, identity: &VerifiedIdentity) -> ServiceResult<Session> {
        let session = self
            .state
            .sessions
            .get_session_by_id(&identity.session_id)
            .await?
            .ok_or_else(|| ServiceError::authentication("Session not found"))?;

        if session.user_id != identity.user_id {
            return Err(ServiceError::authentication(
                "Session does not belong to the token subject",
            ));
        }
        if !session.is_live_at(Utc::now()) {
            return Err(ServiceError::authentication("Session has ended"));
        }

        Ok(session)
    }

    fn session_expiry(&self, issued_at: DateTime<Utc>) -> ServiceResult<DateTime<Utc>> {
        i64::try_from(self.state.config.session_ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| ServiceError::internal_error("SESSION_TTL_SECONDS is out of range"))
    }
}
