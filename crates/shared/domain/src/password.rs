//! Password encryption service.
//!
//! Produces the `(salt, hash_pass)` pair stored with every new user.
//! Hashing is deterministic for a given salt, so a stored hash can be
//! reproduced from the salt and the plain text.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Salt and hash generation used when creating users.
pub trait PasswordEncryption: Send + Sync {
    /// Generate a fresh random salt.
    fn generate_salt(&self) -> String;

    /// Hash `plain_text` with `salt`.
    ///
    /// # Errors
    /// Returns a password error if the salt is not a valid salt string.
    fn generate_hashed_password(&self, salt: &str, plain_text: &str) -> DomainResult<String>;
}

/// Argon2 implementation with default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Encryption;

impl Argon2Encryption {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PasswordEncryption for Argon2Encryption {
    fn generate_salt(&self) -> String {
        SaltString::generate(&mut OsRng).as_str().to_string()
    }

    fn generate_hashed_password(&self, salt: &str, plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::from_b64(salt)
            .map_err(|e| DomainError::password(format!("Invalid salt: {}", e)))?;
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_reproducible_from_salt() {
        let encryption = Argon2Encryption::new();
        let salt = encryption.generate_salt();

        let first = encryption.generate_hashed_password(&salt, "pw123").unwrap();
        let second = encryption.generate_hashed_password(&salt, "pw123").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, "pw123");
    }

    #[test]
    fn test_different_salts_different_hashes() {
        let encryption = Argon2Encryption::new();
        let salt1 = encryption.generate_salt();
        let salt2 = encryption.generate_salt();
        assert_ne!(salt1, salt2);

        let hash1 = encryption.generate_hashed_password(&salt1, "SamePassword").unwrap();
        let hash2 = encryption.generate_hashed_password(&salt2, "SamePassword").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_different_passwords_different_hashes() {
        let encryption = Argon2Encryption::new();
        let salt = encryption.generate_salt();

        let hash1 = encryption.generate_hashed_password(&salt, "Password123!").unwrap();
        let hash2 = encryption.generate_hashed_password(&salt, "Password456!").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_embeds_salt() {
        let encryption = Argon2Encryption::new();
        let salt = encryption.generate_salt();
        let hash = encryption.generate_hashed_password(&salt, "pw123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hash.contains(&salt));
    }

    #[test]
    fn test_invalid_salt_rejected() {
        let encryption = Argon2Encryption::new();
        let result = encryption.generate_hashed_password("$$", "pw123");
        assert!(matches!(result, Err(DomainError::Password(_))));
    }
}
