//! User business logic service.
//!
//! Handles account creation and the self-service update and delete flows.

use crate::api::user::models::{CreateUserRequest, UpdateUserRequest};
use crate::auth::models::VerifiedIdentity;
use crate::auth::service::AuthService;
use crate::database::models::{User, UserChanges};
use crate::errors::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::utils::password::hash_password;
use tracing::info;
use validator::{Validate, ValidationErrors};

pub struct UserService<'a> {
    state: &'a AppState,
}

impl<'a> UserService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Creates a new user.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Empty password
    /// - Password found in the breach corpus
    /// - Malformed email
    /// - Storage failures, including a duplicate live email
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<User> {
        if request.password.is_empty() {
            return Err(ServiceError::validation("Password must be set"));
        }
        self.ensure_not_compromised(&request.password).await?;
        request.validate().map_err(invalid_email)?;

        let password_hash = hash_password(&request.password)?;
        let user = self
            .state
            .users
            .create_user(&request.email, &request.name, &password_hash)
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Applies a partial update to the caller's own account.
    ///
    /// # Errors
    /// - `Authentication` if the token's session has ended
    /// - `Validation` for an empty patch, a breached password or a bad email
    /// - `NotFound` if the user no longer exists
    pub async fn update_user(
        &self,
        identity: &VerifiedIdentity,
        request: UpdateUserRequest,
    ) -> ServiceResult<User> {
        AuthService::new(self.state)
            .require_live_session(identity)
            .await?;

        let request = request.normalized();
        if request.is_empty() {
            return Err(ServiceError::validation(
                "At least one of email, name or password must be set",
            ));
        }
        if let Some(password) = &request.password {
            self.ensure_not_compromised(password).await?;
        }
        request.validate().map_err(invalid_email)?;

        let changes = UserChanges {
            email: request.email,
            name: request.name,
            password_hash: request.password.as_deref().map(hash_password).transpose()?,
        };

        let user = self
            .state
            .users
            .update_user_by_id(&identity.user_id, &changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &identity.user_id))?;

        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    /// Soft-deletes the caller's own account.
    pub async fn delete_user(&self, identity: &VerifiedIdentity) -> ServiceResult<User> {
        AuthService::new(self.state)
            .require_live_session(identity)
            .await?;

        let user = self
            .state
            .users
            .soft_delete_user_by_id(&identity.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &identity.user_id))?;

        info!(user_id = %user.id, "User deleted");
        Ok(user)
    }

    /// Consults the breach corpus when the deployment enables it.
    async fn ensure_not_compromised(&self, password: &str) -> ServiceResult<()> {
        let Some(checker) = &self.state.breach_checker else {
            return Ok(());
        };

        if checker.is_compromised(password).await? {
            return Err(ServiceError::validation(
                "Password is in the HaveIBeenPwned database",
            ));
        }
        Ok(())
    }
}

/// Only the email field carries validation rules on user payloads.
fn invalid_email(errors: ValidationErrors) -> ServiceError {
    let details: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errors)| {
            errors.iter().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string())
            })
        })
        .collect();

    ServiceError::validation(format!("Email is invalid, {}", details.join(", ")))
}
