//! Central module for application-wide configuration settings.
//!
//! The configuration is loaded once at startup and shared behind an `Arc`.
//! Request-time code never reads the process environment; the signing keys in
//! particular are fixed for the lifetime of the process.

use anyhow::{Context, Result, bail};
use std::env;

pub const DEFAULT_BREACH_CHECK_URL: &str = "https://api.pwnedpasswords.com/range/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Secret used to sign new tokens. Also accepted when verifying.
    pub jwt_secret: String,
    /// Retired secrets that still verify tokens issued before a rotation.
    pub jwt_previous_secrets: Vec<String>,
    pub session_ttl_seconds: u64,
    pub server_port: u16,
    pub breach_check_enabled: bool,
    pub breach_check_url: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = lookup("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_previous_secrets = lookup("JWT_PREVIOUS_SECRETS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|secret| !secret.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let session_ttl_seconds = lookup("SESSION_TTL_SECONDS")
            .unwrap_or_else(|| "86400".to_string())
            .parse::<u64>()
            .context("SESSION_TTL_SECONDS must be a valid number")?;

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let breach_check_enabled = lookup("BREACH_CHECK_ENABLED")
            .unwrap_or_else(|| "false".to_string())
            .parse::<bool>()
            .context("BREACH_CHECK_ENABLED must be true or false")?;

        let breach_check_url =
            lookup("BREACH_CHECK_URL").unwrap_or_else(|| DEFAULT_BREACH_CHECK_URL.to_string());

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
        };

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_previous_secrets,
            session_ttl_seconds,
            server_port,
            breach_check_enabled,
            breach_check_url,
            log_format,
        })
    }
}
