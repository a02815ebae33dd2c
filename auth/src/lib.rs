//! Credential and session-authentication library
//!
//! The security core for the banking backend:
//! - Salted Argon2id password hashing
//! - Self-contained access tokens sealed with XChaCha20-Poly1305
//! - An `Authenticator` facade tying the two together
//!
//! Token creation and verification are pure functions of the symmetric key
//! and a clock; nothing here performs I/O or holds mutable state, so every
//! type can be shared freely across request handlers.
//!
//! # Examples
//!
//! Hashing and checking a password:
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("swordfish-9").unwrap();
//! assert!(hasher.verify("swordfish-9", &hash).is_ok());
//! ```
//!
//! Sealing and opening an access token:
//! ```
//! use auth::{EncryptedTokenMaker, TokenMaker, SYMMETRIC_KEY_SIZE};
//! use chrono::Duration;
//!
//! let maker = EncryptedTokenMaker::new(&[7u8; SYMMETRIC_KEY_SIZE]).unwrap();
//! let (token, _) = maker.create_token("alice", Duration::minutes(15)).unwrap();
//! let payload = maker.verify_token(&token).unwrap();
//! assert_eq!(payload.username, "alice");
//! ```
//!
//! The full login story:
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, EncryptedTokenMaker, SYMMETRIC_KEY_SIZE};
//! use chrono::Duration;
//!
//! let maker = Arc::new(EncryptedTokenMaker::new(&[7u8; SYMMETRIC_KEY_SIZE]).unwrap());
//! let authenticator = Authenticator::new(maker);
//!
//! // Registration stores only the hash
//! let hash = authenticator.hash_password("swordfish-9").unwrap();
//!
//! // Login checks the hash and issues a token
//! let result = authenticator
//!     .authenticate("swordfish-9", &hash, "alice", Duration::minutes(15))
//!     .unwrap();
//!
//! // Protected requests present the token
//! let payload = authenticator.verify_token(&result.access_token).unwrap();
//! assert_eq!(payload.username, "alice");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Flatten the public surface
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Clock;
pub use token::EncryptedTokenMaker;
pub use token::ManualClock;
pub use token::Payload;
pub use token::SystemClock;
pub use token::TokenError;
pub use token::TokenMaker;
pub use token::SYMMETRIC_KEY_SIZE;
