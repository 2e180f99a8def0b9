//! Password hashing for customer and employee logins.

use crate::error::AppError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("hash password: {}", e)))
}

/// False for a wrong password or an unparsable stored hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => {
            tracing::warn!("stored password is not an argon2 hash");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("s3cret-pin").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret-pin", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn plaintext_in_store_never_matches() {
        assert!(!verify_password("hunter22", "hunter22"));
    }
}
