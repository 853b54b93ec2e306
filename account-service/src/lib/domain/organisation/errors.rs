use thiserror::Error;

use crate::domain::organisation::models::OrganisationId;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;

/// Error type for OrganisationId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrganisationIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for OrganisationName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrganisationNameError {
    #[error("name is required")]
    Empty,

    #[error("name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all organisation-related operations
#[derive(Debug, Clone, Error)]
pub enum OrganisationError {
    #[error("Invalid organisation ID: {0}")]
    InvalidOrganisationId(#[from] OrganisationIdError),

    #[error("Invalid organisation name: {0}")]
    InvalidOrganisationName(#[from] OrganisationNameError),

    #[error("Organisation not found: {0}")]
    NotFound(OrganisationId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Organisation ID already exists: {0}")]
    OrganisationIdAlreadyExists(OrganisationId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for OrganisationError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DatabaseError(msg) => OrganisationError::DatabaseError(msg),
            other => OrganisationError::Unknown(other.to_string()),
        }
    }
}
