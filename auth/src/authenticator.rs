use std::sync::Arc;

use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Payload;
use crate::token::TokenError;
use crate::token::TokenMaker;

/// Couples password verification with access token issuance.
///
/// Services hold one `Authenticator` and never touch the hashing or token
/// primitives directly.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_maker: Arc<dyn TokenMaker>,
}

/// What a successful login hands back.
pub struct AuthenticationResult {
    /// Opaque access token for the session
    pub access_token: String,

    /// Payload sealed inside the access token
    pub payload: Payload,
}

/// Ways an authentication attempt can fail.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password failure: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Wire an authenticator around the given token maker.
    ///
    /// # Arguments
    /// * `token_maker` - Issues and verifies the access tokens
    ///
    /// # Returns
    /// An authenticator with a default password hasher
    pub fn new(token_maker: Arc<dyn TokenMaker>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_maker,
        }
    }

    /// Hash a plaintext password so it can be stored.
    ///
    /// # Arguments
    /// * `password` - The plaintext to hash
    ///
    /// # Returns
    /// The PHC hash string
    ///
    /// # Errors
    /// * `PasswordError` - The hasher could not produce a hash
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// A wrong password surfaces as `InvalidCredentials` rather than as a
    /// password error, so callers can answer clients with a single message
    /// that does not reveal which part of the credentials was wrong.
    ///
    /// # Arguments
    /// * `password` - The plaintext presented by the client
    /// * `stored_hash` - The PHC string on record
    /// * `username` - Subject to seal into the token
    /// * `duration` - Lifetime of the issued token
    ///
    /// # Returns
    /// The access token together with its sealed payload
    ///
    /// # Errors
    /// * `InvalidCredentials` - The password is wrong
    /// * `PasswordError` - Verification failed for another reason
    /// * `TokenError` - The token could not be issued
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        username: &str,
        duration: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(|e| match e {
                PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
                other => AuthenticationError::PasswordError(other),
            })?;

        let (access_token, payload) = self.token_maker.create_token(username, duration)?;

        Ok(AuthenticationResult {
            access_token,
            payload,
        })
    }

    /// Verify an access token and recover its payload.
    ///
    /// # Arguments
    /// * `token` - Opaque access token presented by a client
    ///
    /// # Returns
    /// Payload sealed inside the token
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed or tampered with
    /// * `ExpiredToken` - Token is authentic but past its expiry
    pub fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        self.token_maker.verify_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::EncryptedTokenMaker;
    use crate::token::SYMMETRIC_KEY_SIZE;

    const TEST_KEY: &[u8; SYMMETRIC_KEY_SIZE] = b"test-symmetric-key-32-bytes-long";

    fn authenticator() -> Authenticator {
        let token_maker =
            EncryptedTokenMaker::new(TEST_KEY).expect("Token maker rejected test key");
        Authenticator::new(Arc::new(token_maker))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "swordfish-9";
        let hash = authenticator
            .hash_password(password)
            .expect("Hashing failed");

        let result = authenticator
            .authenticate(password, &hash, "alice", Duration::minutes(15))
            .expect("Login flow failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.payload.username, "alice");

        // Round-trip the issued token
        let payload = authenticator
            .verify_token(&result.access_token)
            .expect("Issued token did not verify");
        assert_eq!(payload, result.payload);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let password = "swordfish-9";
        let hash = authenticator
            .hash_password(password)
            .expect("Hashing failed");

        let result = authenticator.authenticate(
            "wrong-password",
            &hash,
            "alice",
            Duration::minutes(15),
        );
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_invalid_stored_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate(
            "swordfish-9",
            "not-a-phc-hash",
            "alice",
            Duration::minutes(15),
        );
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(
                PasswordError::InvalidHash(_)
            ))
        ));
    }

    #[test]
    fn test_verify_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.verify_token("invalid-token");
        assert_eq!(result, Err(TokenError::InvalidToken));
    }
}
