use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::organisation::errors::OrganisationError;
use crate::domain::organisation::models::Organisation;
use crate::domain::user::models::User;
use crate::domain::user::models::UserSession;
use crate::user::errors::UserError;

pub mod add_member;
pub mod create_organisation;
pub mod get_organisation;
pub mod get_user;
pub mod list_organisations;
pub mod login;
pub mod register;

/// Message returned for every authentication failure on protected routes.
pub const UNAUTHORIZED_MESSAGE: &str = "Authentication required";

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: &str, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, Some(data))))
    }
}

impl ApiSuccess<()> {
    pub fn without_data(status: StatusCode, message: &str) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, None)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::InternalServerError(detail) => {
                // Details stay in the logs
                tracing::error!(error = %detail, "Request failed with internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            ApiError::UnprocessableEntity(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg) => msg,
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

/// JSON request body. Malformed or mistyped bodies are rejected with a 422
/// in the standard error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidPhone(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::NotFound(_) | UserError::InvalidUserId(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            UserError::EmailAlreadyExists(_) | UserError::UserIdAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::Credential(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<OrganisationError> for ApiError {
    fn from(err: OrganisationError) -> Self {
        match err {
            OrganisationError::InvalidOrganisationName(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            OrganisationError::NotFound(_) | OrganisationError::InvalidOrganisationId(_) => {
                ApiError::NotFound("Organisation not found".to_string())
            }
            OrganisationError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            OrganisationError::OrganisationIdAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            OrganisationError::DatabaseError(_) | OrganisationError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: &str, data: Option<T>) -> Self {
        Self {
            status: "success",
            message: message.to_string(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    status: &'static str,
    message: String,
    status_code: u16,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status: "error",
            message,
            status_code: status_code.as_u16(),
        }
    }
}

/// Public view of a user. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            phone: user.phone.as_ref().map(|p| p.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub access_token: String,
    pub user: UserData,
}

impl From<&UserSession> for SessionData {
    fn from(session: &UserSession) -> Self {
        Self {
            access_token: session.access_token.clone(),
            user: (&session.user).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationData {
    pub org_id: String,
    pub name: String,
    pub description: String,
}

impl From<&Organisation> for OrganisationData {
    fn from(organisation: &Organisation) -> Self {
        Self {
            org_id: organisation.id.to_string(),
            name: organisation.name.as_str().to_string(),
            description: organisation.description.clone(),
        }
    }
}
