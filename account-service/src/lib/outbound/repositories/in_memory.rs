use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::organisation::errors::OrganisationError;
use crate::domain::organisation::models::Organisation;
use crate::domain::organisation::models::OrganisationId;
use crate::domain::organisation::ports::OrganisationRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
struct Store {
    users: HashMap<UserId, User>,
    organisations: HashMap<OrganisationId, Organisation>,
    memberships: HashSet<(OrganisationId, UserId)>,
}

/// Process-local store implementing both repository ports.
///
/// Enforces the same uniqueness rules as the PostgreSQL schema. Each write
/// holds the lock for its whole check-then-insert, so concurrent duplicate
/// registrations cannot both succeed. Clones share the same store.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut store = self.store.write().await;

        if store.users.contains_key(&user.id) {
            return Err(UserError::UserIdAlreadyExists(user.id.to_string()));
        }

        if store.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.store.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .store
            .read()
            .await
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }
}

#[async_trait]
impl OrganisationRepository for InMemoryRepository {
    async fn create(
        &self,
        organisation: Organisation,
        creator: &UserId,
    ) -> Result<Organisation, OrganisationError> {
        let mut store = self.store.write().await;

        if store.organisations.contains_key(&organisation.id) {
            return Err(OrganisationError::OrganisationIdAlreadyExists(
                organisation.id,
            ));
        }

        if !store.users.contains_key(creator) {
            return Err(OrganisationError::UserNotFound(*creator));
        }

        store
            .organisations
            .insert(organisation.id, organisation.clone());
        store.memberships.insert((organisation.id, *creator));

        Ok(organisation)
    }

    async fn find_by_id(
        &self,
        id: &OrganisationId,
    ) -> Result<Option<Organisation>, OrganisationError> {
        Ok(self.store.read().await.organisations.get(id).cloned())
    }

    async fn find_by_member(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Organisation>, OrganisationError> {
        let store = self.store.read().await;

        let mut organisations: Vec<Organisation> = store
            .memberships
            .iter()
            .filter(|(_, member)| member == user_id)
            .filter_map(|(org_id, _)| store.organisations.get(org_id).cloned())
            .collect();
        organisations.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(organisations)
    }

    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), OrganisationError> {
        let mut store = self.store.write().await;

        if !store.organisations.contains_key(organisation_id) {
            return Err(OrganisationError::NotFound(*organisation_id));
        }

        if !store.users.contains_key(user_id) {
            return Err(OrganisationError::UserNotFound(*user_id));
        }

        store.memberships.insert((*organisation_id, *user_id));
        Ok(())
    }
}
