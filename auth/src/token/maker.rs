use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::aead::AeadCore;
use chacha20poly1305::aead::KeyInit;
use chacha20poly1305::aead::OsRng;
use chacha20poly1305::XChaCha20Poly1305;
use chacha20poly1305::XNonce;
use chrono::Duration;

use super::clock::Clock;
use super::clock::SystemClock;
use super::errors::TokenError;
use super::payload::Payload;

/// Required key length in bytes for the symmetric token maker.
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// Length in bytes of the random nonce prepended to each token.
const NONCE_SIZE: usize = 24;

/// Issues and verifies access tokens.
///
/// Implementations decide the concrete token format. Callers only depend on
/// this trait, so the format can change (for example to an asymmetric scheme
/// where issuing and verifying use different keys) without touching call
/// sites.
pub trait TokenMaker: Send + Sync {
    /// Create a token for a user session.
    ///
    /// # Arguments
    /// * `username` - Username the token authenticates
    /// * `duration` - How long the token stays valid
    ///
    /// # Returns
    /// The opaque token string together with the payload sealed inside it
    ///
    /// # Errors
    /// * `EncodingFailed` - Payload could not be serialized or sealed
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError>;

    /// Verify a token and recover its payload.
    ///
    /// # Arguments
    /// * `token` - Opaque token string presented by a client
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, tampered with, or sealed under
    ///   a different key
    /// * `ExpiredToken` - Token is authentic but past its expiry
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}

/// Token maker backed by XChaCha20-Poly1305 authenticated encryption.
///
/// Each token is the payload serialized to JSON, sealed under a random
/// 24-byte nonce, and emitted as `base64url(nonce || ciphertext)`. The
/// authentication tag covers the whole payload, so any modification of the
/// token is detected during decryption. Because the nonce is random, issuing
/// the same payload twice produces two different token strings.
pub struct EncryptedTokenMaker {
    cipher: XChaCha20Poly1305,
    clock: Arc<dyn Clock>,
}

impl EncryptedTokenMaker {
    /// Create a token maker using the system clock.
    ///
    /// # Arguments
    /// * `key` - Symmetric key, exactly [`SYMMETRIC_KEY_SIZE`] bytes
    ///
    /// # Errors
    /// * `InvalidKeySize` - Key is not exactly [`SYMMETRIC_KEY_SIZE`] bytes
    ///
    /// Anyone holding the key can mint tokens for any user, so the key
    /// belongs in the environment or a secret store, never in code.
    pub fn new(key: &[u8]) -> Result<Self, TokenError> {
        Self::with_clock(key, Arc::new(SystemClock))
    }

    /// Create a token maker reading time from the given clock.
    ///
    /// Used by tests to issue tokens at one instant and verify them at
    /// another.
    ///
    /// # Errors
    /// * `InvalidKeySize` - Key is not exactly [`SYMMETRIC_KEY_SIZE`] bytes
    pub fn with_clock(key: &[u8], clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        let cipher =
            XChaCha20Poly1305::new_from_slice(key).map_err(|_| TokenError::InvalidKeySize {
                expected: SYMMETRIC_KEY_SIZE,
                actual: key.len(),
            })?;

        Ok(Self { cipher, clock })
    }
}

impl TokenMaker for EncryptedTokenMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, duration, self.clock.now());

        let plaintext =
            serde_json::to_vec(&payload).map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_slice())
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        let mut sealed = nonce.to_vec();
        sealed.extend_from_slice(&ciphertext);

        Ok((URL_SAFE_NO_PAD.encode(sealed), payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let sealed = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| TokenError::InvalidToken)?;

        if sealed.len() < NONCE_SIZE {
            return Err(TokenError::InvalidToken);
        }

        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(XNonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| TokenError::InvalidToken)?;

        let payload: Payload =
            serde_json::from_slice(&plaintext).map_err(|_| TokenError::InvalidToken)?;

        // Expiry is only meaningful once decryption has proven authenticity
        if payload.is_expired(self.clock.now()) {
            return Err(TokenError::ExpiredToken);
        }

        Ok(payload)
    }
}
