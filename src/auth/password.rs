//! Argon2 password hashing and verification

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::error;

use crate::common::ApiError;

/// Hash a password with Argon2 and a fresh random salt
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            ApiError::InternalServer("password hashing failed".to_string())
        })
}

/// Verify a password against a stored Argon2 hash
///
/// A malformed stored hash verifies as false rather than erroring, so a
/// corrupted row cannot be distinguished from a wrong password by the caller.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("Abcdef12").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Abcdef12", &hash));
        assert!(!verify_password("Abcdef13", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("Abcdef12").expect("hashing should succeed");
        let second = hash_password("Abcdef12").expect("hashing should succeed");
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!verify_password("Abcdef12", "not-a-valid-hash"));
    }
}
