//! One-way password hashing with bcrypt.
//!
//! ## Usage
//!
//! ```rust
//! let hash = hash_password("hunter2")?;
//! assert!(verify_password("hunter2", &hash));
//! ```

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{hash, verify};

/// bcrypt work factor.
///
/// Fixed at the bcrypt minimum so tests stay fast. Raise it for production
/// deployments; existing hashes keep verifying because the cost is embedded
/// in each hash.
pub const BCRYPT_COST: u32 = 4;

/// Hashes a plaintext password with a fresh random salt.
///
/// # Errors
/// Returns `ServiceError::InternalError` if the random source or encoding fails
pub fn hash_password(plaintext: &str) -> ServiceResult<String> {
    hash(plaintext, BCRYPT_COST)
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
}

/// Checks a plaintext password against a stored hash.
///
/// Mismatches and malformed hashes both return `false`.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    verify(plaintext, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let valid = hash_password("testpassword").unwrap();
        let other = hash_password("badpass").unwrap();

        assert!(verify_password("testpassword", &valid));
        assert!(!verify_password("testpassword", &other));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same", &first));
        assert!(verify_password("same", &second));
    }

    #[test]
    fn test_cost_is_embedded_in_hash() {
        let hashed = hash_password("secret").unwrap();
        assert!(hashed.starts_with("$2b$04$"));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!verify_password("secret", ""));
        assert!(!verify_password("secret", "not-a-bcrypt-hash"));
    }
}
