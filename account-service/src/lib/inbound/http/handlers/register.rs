use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::SessionData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::Phone;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordInputError;
use crate::user::errors::PhoneError;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| {
            ApiSuccess::new(StatusCode::CREATED, "Registration successful", session.into())
        })
}

/// HTTP request body for registration (raw JSON)
///
/// Absent fields deserialize to empty strings so they are reported as
/// validation failures rather than JSON errors.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    phone: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("{0}")]
    Name(#[from] NameError),

    #[error("{0}")]
    Email(#[from] EmailError),

    #[error("{0}")]
    Password(#[from] PasswordInputError),

    #[error("{0}")]
    Phone(#[from] PhoneError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let first_name = PersonName::new("firstName", self.first_name)?;
        let last_name = PersonName::new("lastName", self.last_name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        // A blank phone is the same as none
        let phone = self
            .phone
            .filter(|p| !p.trim().is_empty())
            .map(Phone::new)
            .transpose()?;

        Ok(RegisterUserCommand {
            first_name,
            last_name,
            email,
            password,
            phone,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
