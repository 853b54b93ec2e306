use async_trait::async_trait;

use crate::domain::organisation::errors::OrganisationError;
use crate::domain::organisation::models::CreateOrganisationCommand;
use crate::domain::organisation::models::Organisation;
use crate::domain::organisation::models::OrganisationId;
use crate::domain::user::models::UserId;

/// Port for organisation domain service operations.
#[async_trait]
pub trait OrganisationServicePort: Send + Sync + 'static {
    /// Create an organisation with the caller as its first member.
    ///
    /// # Errors
    /// * `UserNotFound` - Creator no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_organisation(
        &self,
        creator: &UserId,
        command: CreateOrganisationCommand,
    ) -> Result<Organisation, OrganisationError>;

    /// Retrieve organisation by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Organisation does not exist
    async fn get_organisation(&self, id: &OrganisationId)
        -> Result<Organisation, OrganisationError>;

    /// List organisations the user is a member of.
    async fn list_organisations(&self, user_id: &UserId)
        -> Result<Vec<Organisation>, OrganisationError>;

    /// Add a user to an organisation. Adding an existing member is a no-op.
    ///
    /// # Errors
    /// * `NotFound` - Organisation does not exist
    /// * `UserNotFound` - User does not exist
    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), OrganisationError>;
}

/// Persistence operations for organisation aggregate and its membership.
#[async_trait]
pub trait OrganisationRepository: Send + Sync + 'static {
    /// Persist an organisation and its creator's membership atomically.
    ///
    /// # Errors
    /// * `OrganisationIdAlreadyExists` - Identifier is already taken
    /// * `UserNotFound` - Creator does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        organisation: Organisation,
        creator: &UserId,
    ) -> Result<Organisation, OrganisationError>;

    /// Retrieve organisation by identifier.
    async fn find_by_id(
        &self,
        id: &OrganisationId,
    ) -> Result<Option<Organisation>, OrganisationError>;

    /// Retrieve organisations a user belongs to, newest first.
    async fn find_by_member(&self, user_id: &UserId)
        -> Result<Vec<Organisation>, OrganisationError>;

    /// Record membership. Idempotent.
    ///
    /// # Errors
    /// * `NotFound` - Organisation does not exist
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), OrganisationError>;
}
