use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id password hashing.
///
/// Every hash carries its own random salt inside a PHC string, so the stored
/// string is all `verify` ever needs.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Build a hasher pinned to Argon2id v19 with the default parameters.
    ///
    /// # Returns
    /// A hasher ready for `hash` and `verify`
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
        }
    }

    /// Hash a plaintext password for storage.
    ///
    /// A fresh salt is drawn on every call, so hashing the same password twice
    /// yields two different strings.
    ///
    /// # Arguments
    /// * `password` - The plaintext to hash
    ///
    /// # Returns
    /// A PHC string carrying algorithm, parameters, salt, and digest
    ///
    /// # Errors
    /// * `HashingFailed` - The primitive could not produce a hash
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC string.
    ///
    /// # Arguments
    /// * `password` - The plaintext to check
    /// * `hash` - The stored PHC string
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the hash
    /// * `InvalidHash` - The stored string is not parsable PHC
    /// * `VerificationFailed` - The primitive failed for another reason
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|e| match e {
                HashError::Password => PasswordError::Mismatch,
                other => PasswordError::VerificationFailed(other.to_string()),
            })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "swordfish-9";

        let hash = hasher.hash(password).expect("Hashing failed");

        hasher
            .verify(password, &hash)
            .expect("Right password rejected");

        // A wrong password is a typed mismatch, not a boolean
        let result = hasher.verify("wrong-password", &hash);
        assert_eq!(result, Err(PasswordError::Mismatch));
    }

    #[test]
    fn test_hash_produces_phc_string() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("swordfish-9").expect("Hashing failed");

        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_uses_fresh_salt() {
        let hasher = PasswordHasher::new();
        let password = "swordfish-9";

        let first = hasher.hash(password).expect("Hashing failed");
        let second = hasher.hash(password).expect("Hashing failed");

        // Random salts make the hashes differ despite identical input
        assert_ne!(first, second);
        hasher
            .verify(password, &first)
            .expect("Right password rejected");
        hasher
            .verify(password, &second)
            .expect("Right password rejected");
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("swordfish-9", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }
}
