use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Inbound port onto the user domain.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user from an already-validated command.
    ///
    /// Hashes the password before anything touches storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Record collides
    ///   with an existing user
    /// * `Password` - Password hashing failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Look up a user by username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - Username is not registered
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Store a new user.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Uniqueness
    ///   violated
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Fetch a user by username, `None` when absent.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
