//! Shared, read-only application state handed to every request.

use crate::config::Config;
use crate::database::Database;
use crate::errors::ServiceResult;
use crate::repositories::session_repository::SqliteSessionRepository;
use crate::repositories::user_repository::SqliteUserRepository;
use crate::repositories::{SessionStore, UserStore};
use crate::services::breach_service::{BreachChecker, PwnedPasswordsClient};
use crate::utils::jwt::JwtUtils;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt: Arc<JwtUtils>,
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<dyn SessionStore>,
    /// `None` when the breach check is switched off for this deployment.
    pub breach_checker: Option<Arc<dyn BreachChecker>>,
}

impl AppState {
    /// Wires the SQLite stores and, if enabled, the Pwned Passwords client.
    pub fn from_database(config: Config, database: &Database) -> ServiceResult<Self> {
        let breach_checker: Option<Arc<dyn BreachChecker>> = if config.breach_check_enabled {
            Some(Arc::new(PwnedPasswordsClient::new(
                config.breach_check_url.clone(),
            )?))
        } else {
            None
        };

        Self::new(
            config,
            Arc::new(SqliteUserRepository::new(database.pool().clone())),
            Arc::new(SqliteSessionRepository::new(database.pool().clone())),
            breach_checker,
        )
    }

    pub fn new(
        config: Config,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        breach_checker: Option<Arc<dyn BreachChecker>>,
    ) -> ServiceResult<Self> {
        let jwt = JwtUtils::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            users,
            sessions,
            breach_checker,
        })
    }
}
