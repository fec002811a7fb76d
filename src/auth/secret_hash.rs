//! Password hashing with Argon2id.
//!
//! Hashes are PHC-format strings with a random per-hash salt, so hashing the
//! same password twice yields different strings that both verify.

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// A malformed stored hash verifies as `false` instead of erroring, so the
/// caller learns nothing about why verification failed.
pub fn is_secret_valid(pw: &str, hash: &str) -> bool {
    let Ok(hash) = PasswordHashString::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(pw.as_bytes(), &hash.password_hash())
        .is_ok()
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trip() {
        let hash = generate_secret_hash("secret123").unwrap();
        assert!(is_secret_valid("secret123", &hash));
    }

    #[test]
    fn wrong_secret_fails() {
        let hash = generate_secret_hash("secret123").unwrap();
        assert!(!is_secret_valid("secret124", &hash));
    }

    #[test]
    fn same_secret_hashes_differently() {
        let first = generate_secret_hash("secret123").unwrap();
        let second = generate_secret_hash("secret123").unwrap();
        assert_ne!(first, second);
        assert!(is_secret_valid("secret123", &first));
        assert!(is_secret_valid("secret123", &second));
    }

    #[test]
    fn malformed_hash_verifies_false() {
        assert!(!is_secret_valid("secret123", "not-a-phc-string"));
        assert!(!is_secret_valid("secret123", ""));
    }
}
