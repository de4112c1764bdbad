//! Shared fixtures for unit and handler tests.

use crate::api;
use crate::config::{Config, DEFAULT_BREACH_CHECK_URL, LogFormat};
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::memory_repository::InMemoryStore;
use crate::services::breach_service::BreachChecker;
use crate::state::AppState;
use crate::utils::password::hash_password;
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout_seconds: 3,
        jwt_secret: "test-secret-key-for-jwt".to_string(),
        jwt_previous_secrets: Vec::new(),
        session_ttl_seconds: 86400,
        server_port: 0,
        breach_check_enabled: false,
        breach_check_url: DEFAULT_BREACH_CHECK_URL.to_string(),
        log_format: LogFormat::Pretty,
    }
}

fn build_state(breach_checker: Option<Arc<dyn BreachChecker>>) -> AppState {
    let store = Arc::new(InMemoryStore::default());
    AppState::new(test_config(), store.clone(), store, breach_checker).unwrap()
}

/// State over an in-memory store with the breach check switched off.
pub fn test_state() -> AppState {
    build_state(None)
}

pub fn test_state_with_breach(checker: StubBreachChecker) -> AppState {
    build_state(Some(Arc::new(checker)))
}

/// Answers breach queries from a fixed list instead of the network.
pub struct StubBreachChecker {
    compromised: Vec<String>,
    available: bool,
}

impl StubBreachChecker {
    pub fn compromised(passwords: &[&str]) -> Self {
        Self {
            compromised: passwords.iter().map(|p| p.to_string()).collect(),
            available: true,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            compromised: Vec::new(),
            available: false,
        }
    }
}

#[async_trait]
impl BreachChecker for StubBreachChecker {
    async fn is_compromised(&self, plaintext: &str) -> ServiceResult<bool> {
        if !self.available {
            return Err(ServiceError::external_service("breach corpus unreachable"));
        }
        Ok(self.compromised.iter().any(|p| p == plaintext))
    }
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(api::router(state)).unwrap()
}

pub async fn seed_user(state: &AppState, email: &str, password: &str) -> User {
    let password_hash = hash_password(password).unwrap();
    state
        .users
        .create_user(email, "Test User", &password_hash)
        .await
        .unwrap()
}

/// Logs in over HTTP and returns the issued token.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/sessions")
        .json(&json!({"email": email, "password": password}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"].as_str().unwrap().to_string()
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}
