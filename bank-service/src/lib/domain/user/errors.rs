use auth::PasswordError;
use thiserror::Error;

/// Why a raw username was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters required, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters allowed, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Username must contain only letters and digits")]
    InvalidCharacters,
}

/// Why a raw full name was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("Full name must not be empty")]
    Empty,
}

/// Why a raw email address was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Not a valid email address: {0}")]
    InvalidFormat(String),
}

/// Everything that can go wrong around the user aggregate.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Validation failures pass through with their own messages
    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),

    #[error(transparent)]
    InvalidFullName(#[from] FullNameError),

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error("Password handling failed: {0}")]
    Password(#[from] PasswordError),

    // Lookup and uniqueness failures
    #[error("No user found with username: {0}")]
    NotFoundByUsername(String),

    #[error("Username {0} already exists")]
    UsernameAlreadyExists(String),

    #[error("Email {0} already exists")]
    EmailAlreadyExists(String),

    #[error("Internal error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
