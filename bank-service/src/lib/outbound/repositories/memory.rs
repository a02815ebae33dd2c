use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// In-memory user repository.
///
/// Keeps user records in a map keyed by username, guarded by an async
/// read-write lock. Records do not survive a restart; this adapter exists to
/// give the repository port a working implementation without a database.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.username.as_str()) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.username.as_str().to_string(), user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;

        Ok(users.get(username.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::FullName;
    use crate::domain::user::models::UserId;

    fn user(username: &str, email: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            full_name: FullName::new("Test User").unwrap(),
            email: EmailAddress::new(email).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryUserRepository::new();

        let created = repository
            .create(user("alice", "alice@example.com"))
            .await
            .unwrap();

        let found = repository
            .find_by_username(&created.username)
            .await
            .unwrap()
            .expect("User should exist");
        assert_eq!(found.username, created.username);
        assert_eq!(found.email, created.email);
    }

    #[tokio::test]
    async fn test_find_missing_user() {
        let repository = InMemoryUserRepository::new();

        let username = Username::new("ghost".to_string()).unwrap();
        let found = repository.find_by_username(&username).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_rejects_duplicate_username() {
        let repository = InMemoryUserRepository::new();

        repository
            .create(user("alice", "alice@example.com"))
            .await
            .unwrap();

        let result = repository.create(user("alice", "bob@example.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_rejects_duplicate_email() {
        let repository = InMemoryUserRepository::new();

        repository
            .create(user("alice", "alice@example.com"))
            .await
            .unwrap();

        // Same address spelled in a different case still counts as taken
        let result = repository.create(user("bob", "alice@EXAMPLE.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }
}
