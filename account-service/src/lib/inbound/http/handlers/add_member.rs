use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::organisation::errors::OrganisationError;
use crate::domain::organisation::models::OrganisationId;
use crate::domain::organisation::ports::OrganisationServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_member(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(org_id): Path<String>,
    JsonBody(body): JsonBody<AddMemberRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    let org_id = OrganisationId::from_string(&org_id).map_err(OrganisationError::from)?;

    if body.user_id.trim().is_empty() {
        return Err(ApiError::UnprocessableEntity("userId is required".to_string()));
    }
    let user_id = UserId::from_string(body.user_id.trim())
        .map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    state
        .organisation_service
        .add_member(&org_id, &user_id)
        .await?;

    tracing::debug!(
        organisation_id = %org_id,
        added_by = %caller.user_id,
        "Membership request handled"
    );

    Ok(ApiSuccess::without_data(
        StatusCode::OK,
        "User added to organisation successfully",
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddMemberRequest {
    user_id: String,
}
