//! Compromised-password check against the Pwned Passwords range API.
//!
//! Only the first five hex characters of the password's SHA-1 digest leave the
//! process. The response lists every known suffix sharing that prefix, and the
//! match happens locally.

use crate::errors::{ServiceError, ServiceResult};
use async_trait::async_trait;
use reqwest::Client;
use sha1::{Digest, Sha1};
use std::time::Duration;
use tracing::debug;

const PREFIX_LEN: usize = 5;

#[async_trait]
pub trait BreachChecker: Send + Sync {
    /// Returns whether the plaintext appears in the breach corpus.
    ///
    /// An unreachable corpus is an error, never "not compromised".
    async fn is_compromised(&self, plaintext: &str) -> ServiceResult<bool>;
}

/// HTTP client for the range endpoint (`{base_url}{prefix}`).
#[derive(Debug, Clone)]
pub struct PwnedPasswordsClient {
    http_client: Client,
    base_url: String,
}

impl PwnedPasswordsClient {
    pub fn new(base_url: impl Into<String>) -> ServiceResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                ServiceError::internal_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl BreachChecker for PwnedPasswordsClient {
    async fn is_compromised(&self, plaintext: &str) -> ServiceResult<bool> {
        let digest = hex::encode_upper(Sha1::digest(plaintext.as_bytes()));
        let (prefix, suffix) = digest.split_at(PREFIX_LEN);

        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, prefix))
            .header("Add-Padding", "true")
            .send()
            .await
            .map_err(|e| {
                ServiceError::external_service(format!("Breach check request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::external_service(format!(
                "Breach check returned HTTP {}",
                status
            )));
        }

        let body = response.text().await.map_err(|e| {
            ServiceError::external_service(format!("Breach check response unreadable: {}", e))
        })?;

        let compromised = range_contains(&body, suffix);
        debug!(prefix, compromised, "Breach check completed");
        Ok(compromised)
    }
}

/// Scans `SUFFIX:COUNT` lines. Padding entries carry a count of zero.
fn range_contains(body: &str, suffix: &str) -> bool {
    body.lines().any(|line| {
        let Some((candidate, count)) = line.trim().split_once(':') else {
            return false;
        };
        candidate.eq_ignore_ascii_case(suffix)
            && count.trim().parse::<u64>().map(|c| c > 0).unwrap_or(false)
    })
}
