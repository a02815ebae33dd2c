use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::FullNameError;
use crate::user::errors::UsernameError;

/// A registered bank customer.
///
/// Only the password hash is held here; the plaintext never crosses this
/// boundary.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Surrogate id for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Draw a fresh random (v4) id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type.
///
/// Usernames are 3 to 32 ASCII letters and digits. They double as the
/// account lookup key and as the token subject, so nothing that needs
/// escaping is allowed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Validate and wrap a raw username.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Length outside 3..=32
    /// * `InvalidCharacters` - Anything but ASCII letters and digits
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !username.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    /// The validated name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Customer display name.
///
/// Stored trimmed; the only rule is that something has to be left after
/// trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    /// Trim and wrap a raw full name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    pub fn new(name: &str) -> Result<Self, FullNameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FullNameError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type.
///
/// Wraps the RFC 5322 parsed form; equality follows the parser's rules
/// (domains compare case-insensitively), which is what the duplicate-email
/// check wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(email_address::EmailAddress);

impl EmailAddress {
    /// Parse and wrap a raw email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Input does not parse as an RFC 5322 address
    pub fn new(email: &str) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(email)
            .map(EmailAddress)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// The address exactly as the user wrote it.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new user, carrying already-validated fields. The
/// password stays plaintext here; the service hashes it before anything is
/// stored.
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        let username = Username::new("alice86".to_string()).unwrap();
        assert_eq!(username.as_str(), "alice86");
    }

    #[test]
    fn test_username_too_short() {
        let result = Username::new("ab".to_string());
        assert_eq!(result, Err(UsernameError::TooShort { min: 3, actual: 2 }));
    }

    #[test]
    fn test_username_too_long() {
        let result = Username::new("a".repeat(33));
        assert_eq!(result, Err(UsernameError::TooLong { max: 32, actual: 33 }));
    }

    #[test]
    fn test_username_rejects_punctuation() {
        for raw in ["alice!", "alice_86", "ali-ce", "ali ce", "alicé"] {
            let result = Username::new(raw.to_string());
            assert_eq!(result, Err(UsernameError::InvalidCharacters), "{raw:?}");
        }
    }

    #[test]
    fn test_full_name_is_trimmed() {
        let name = FullName::new("  Alice Hargreaves  ").unwrap();
        assert_eq!(name.as_str(), "Alice Hargreaves");
    }

    #[test]
    fn test_full_name_rejects_blank() {
        assert_eq!(FullName::new(""), Err(FullNameError::Empty));
        assert_eq!(FullName::new("   "), Err(FullNameError::Empty));
    }

    #[test]
    fn test_valid_email() {
        let email = EmailAddress::new("alice@example.com").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_invalid_email() {
        let result = EmailAddress::new("not-an-email");
        assert!(matches!(result, Err(EmailError::InvalidFormat(_))));
    }

    #[test]
    fn test_email_equality_ignores_domain_case() {
        let lower = EmailAddress::new("alice@example.com").unwrap();
        let upper = EmailAddress::new("alice@EXAMPLE.COM").unwrap();
        assert_eq!(lower, upper);
    }
}
