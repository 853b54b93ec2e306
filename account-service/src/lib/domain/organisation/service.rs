use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::organisation::errors::OrganisationError;
use crate::domain::organisation::models::CreateOrganisationCommand;
use crate::domain::organisation::models::Organisation;
use crate::domain::organisation::models::OrganisationId;
use crate::domain::organisation::ports::OrganisationRepository;
use crate::domain::organisation::ports::OrganisationServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for organisation operations.
pub struct OrganisationService<OR, UR>
where
    OR: OrganisationRepository,
    UR: UserRepository,
{
    repository: Arc<OR>,
    user_repository: Arc<UR>,
}

impl<OR, UR> OrganisationService<OR, UR>
where
    OR: OrganisationRepository,
    UR: UserRepository,
{
    /// Create a new organisation service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Organisation persistence implementation
    /// * `user_repository` - User lookups for membership checks
    pub fn new(repository: Arc<OR>, user_repository: Arc<UR>) -> Self {
        Self {
            repository,
            user_repository,
        }
    }

    async fn ensure_user_exists(&self, user_id: &UserId) -> Result<(), OrganisationError> {
        match self.user_repository.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(OrganisationError::UserNotFound(*user_id)),
        }
    }
}

#[async_trait]
impl<OR, UR> OrganisationServicePort for OrganisationService<OR, UR>
where
    OR: OrganisationRepository,
    UR: UserRepository,
{
    async fn create_organisation(
        &self,
        creator: &UserId,
        command: CreateOrganisationCommand,
    ) -> Result<Organisation, OrganisationError> {
        self.ensure_user_exists(creator).await?;

        let organisation = Organisation {
            id: OrganisationId::new(),
            name: command.name,
            description: command.description.unwrap_or_default(),
            created_at: Utc::now(),
        };

        let created = self.repository.create(organisation, creator).await?;

        tracing::info!(
            organisation_id = %created.id,
            creator = %creator,
            "Organisation created"
        );

        Ok(created)
    }

    async fn get_organisation(
        &self,
        id: &OrganisationId,
    ) -> Result<Organisation, OrganisationError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(OrganisationError::NotFound(*id))
    }

    async fn list_organisations(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Organisation>, OrganisationError> {
        self.repository.find_by_member(user_id).await
    }

    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), OrganisationError> {
        if self.repository.find_by_id(organisation_id).await?.is_none() {
            return Err(OrganisationError::NotFound(*organisation_id));
        }

        self.ensure_user_exists(user_id).await?;

        self.repository.add_member(organisation_id, user_id).await?;

        tracing::info!(
            organisation_id = %organisation_id,
            user_id = %user_id,
            "Member added to organisation"
        );

        Ok(())
    }
}
