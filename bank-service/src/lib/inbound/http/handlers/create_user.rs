use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::FullNameError;
use crate::user::errors::UsernameError;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// Registration body as it arrives on the wire, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    username: String,
    full_name: String,
    email_address: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error(transparent)]
    Username(#[from] UsernameError),

    #[error(transparent)]
    FullName(#[from] FullNameError),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error("Password too short: at least {min} characters required")]
    PasswordTooShort { min: usize },
}

impl CreateUserRequest {
    const MIN_PASSWORD_LENGTH: usize = 6;

    fn try_into_command(self) -> Result<CreateUserCommand, ParseCreateUserRequestError> {
        if self.password.len() < Self::MIN_PASSWORD_LENGTH {
            return Err(ParseCreateUserRequestError::PasswordTooShort {
                min: Self::MIN_PASSWORD_LENGTH,
            });
        }

        Ok(CreateUserCommand {
            username: Username::new(self.username)?,
            full_name: FullName::new(&self.full_name)?,
            email: EmailAddress::new(&self.email_address)?,
            password: self.password,
        })
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
