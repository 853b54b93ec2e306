use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::OrganisationData;
use crate::domain::organisation::ports::OrganisationServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Organisations the caller belongs to.
pub async fn list_organisations(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<ApiSuccess<ListOrganisationsResponseData>, ApiError> {
    let organisations = state
        .organisation_service
        .list_organisations(&caller.user_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Organisations retrieved successfully",
        ListOrganisationsResponseData {
            organisations: organisations.iter().map(OrganisationData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListOrganisationsResponseData {
    pub organisations: Vec<OrganisationData>,
}
