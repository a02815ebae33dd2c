use thiserror::Error;

/// Failures surfaced by password hashing and verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Password does not match")]
    Mismatch,

    #[error("Stored password hash is malformed: {0}")]
    InvalidHash(String),

    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),
}
