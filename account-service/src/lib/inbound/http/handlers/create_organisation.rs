use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::OrganisationData;
use crate::domain::organisation::errors::OrganisationError;
use crate::domain::organisation::models::CreateOrganisationCommand;
use crate::domain::organisation::models::OrganisationName;
use crate::domain::organisation::ports::OrganisationServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_organisation(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    JsonBody(body): JsonBody<CreateOrganisationRequest>,
) -> Result<ApiSuccess<OrganisationData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .organisation_service
        .create_organisation(&caller.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref organisation| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "Organisation created successfully",
                organisation.into(),
            )
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateOrganisationRequest {
    name: String,
    description: Option<String>,
}

impl CreateOrganisationRequest {
    fn try_into_command(self) -> Result<CreateOrganisationCommand, OrganisationError> {
        Ok(CreateOrganisationCommand {
            name: OrganisationName::new(self.name)?,
            description: self.description,
        })
    }
}
