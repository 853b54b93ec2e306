use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::OrganisationData;
use crate::domain::organisation::errors::OrganisationError;
use crate::domain::organisation::models::OrganisationId;
use crate::domain::organisation::ports::OrganisationServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_organisation(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
) -> Result<ApiSuccess<OrganisationData>, ApiError> {
    let org_id = OrganisationId::from_string(&org_id).map_err(OrganisationError::from)?;

    state
        .organisation_service
        .get_organisation(&org_id)
        .await
        .map_err(ApiError::from)
        .map(|ref organisation| {
            ApiSuccess::new(StatusCode::OK, "Organisation found", organisation.into())
        })
}
