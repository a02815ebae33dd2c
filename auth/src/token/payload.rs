use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Data carried inside an access token.
///
/// The payload travels encrypted inside the token, so none of these fields
/// are readable (or forgeable) by clients. The `id` uniquely identifies each
/// issued token, which allows individual tokens to be revoked later without
/// affecting other sessions of the same user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Unique token identifier
    pub id: Uuid,

    /// Username of the authenticated user
    pub username: String,

    /// When the token was created
    pub issued_at: DateTime<Utc>,

    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl Payload {
    /// Create a payload for a user session starting now.
    ///
    /// # Arguments
    /// * `username` - Username the token authenticates
    /// * `duration` - How long the token stays valid
    /// * `now` - Current instant, supplied by the caller's clock
    ///
    /// # Returns
    /// Payload with a fresh random id and expiry at `now + duration`
    pub fn new(username: &str, duration: Duration, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            issued_at: now,
            expires_at: now + duration,
        }
    }

    /// Check whether the payload has expired at the given instant.
    ///
    /// A payload is valid through its exact expiry instant and expired
    /// strictly after it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
