use thiserror::Error;

/// Failures surfaced by token issuance and verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("Failed to seal token: {0}")]
    EncodingFailed(String),

    /// Single rejection for every undecryptable or malformed token.
    ///
    /// The variant carries no detail about which check failed.
    #[error("Token is invalid")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,
}
