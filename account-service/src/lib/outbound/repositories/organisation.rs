use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::organisation::errors::OrganisationError;
use crate::domain::organisation::models::Organisation;
use crate::domain::organisation::models::OrganisationId;
use crate::domain::organisation::models::OrganisationName;
use crate::domain::organisation::ports::OrganisationRepository;
use crate::domain::user::models::UserId;

/// PostgreSQL organisation store.
///
/// Membership lives in `organisation_users`, keyed by the internal row ids of
/// both sides; opaque identifiers are resolved with sub-selects.
pub struct PostgresOrganisationRepository {
    pool: PgPool,
}

impl PostgresOrganisationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_organisation(row: PgRow) -> Result<Organisation, OrganisationError> {
        Ok(Organisation {
            id: OrganisationId(row.get("org_id")),
            name: OrganisationName::new(row.get("name"))?,
            description: row.get("description"),
            created_at: row.get("created_at"),
        })
    }
}

fn database_error(e: sqlx::Error) -> OrganisationError {
    OrganisationError::DatabaseError(e.to_string())
}

#[async_trait]
impl OrganisationRepository for PostgresOrganisationRepository {
    async fn create(
        &self,
        organisation: Organisation,
        creator: &UserId,
    ) -> Result<Organisation, OrganisationError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let row = sqlx::query(
            r#"
            INSERT INTO organisations (org_id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(organisation.id.as_uuid())
        .bind(organisation.name.as_str())
        .bind(&organisation.description)
        .bind(organisation.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("organisations_org_id_key")
                {
                    return OrganisationError::OrganisationIdAlreadyExists(organisation.id);
                }
            }
            database_error(e)
        })?;
        let internal_id: i64 = row.get("id");

        let membership = sqlx::query(
            r#"
            INSERT INTO organisation_users (organisation_id, user_id)
            SELECT $1, id FROM users WHERE user_id = $2
            "#,
        )
        .bind(internal_id)
        .bind(creator.0)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if membership.rows_affected() == 0 {
            // Dropping the transaction rolls back the organisation insert
            return Err(OrganisationError::UserNotFound(*creator));
        }

        tx.commit().await.map_err(database_error)?;

        Ok(organisation)
    }

    async fn find_by_id(
        &self,
        id: &OrganisationId,
    ) -> Result<Option<Organisation>, OrganisationError> {
        let row = sqlx::query(
            r#"
            SELECT org_id, name, description, created_at
            FROM organisations
            WHERE org_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Self::row_to_organisation).transpose()
    }

    async fn find_by_member(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Organisation>, OrganisationError> {
        let rows = sqlx::query(
            r#"
            SELECT o.org_id, o.name, o.description, o.created_at
            FROM organisations o
            JOIN organisation_users ou ON ou.organisation_id = o.id
            JOIN users u ON u.id = ou.user_id
            WHERE u.user_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Self::row_to_organisation).collect()
    }

    async fn add_member(
        &self,
        organisation_id: &OrganisationId,
        user_id: &UserId,
    ) -> Result<(), OrganisationError> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT id FROM organisations WHERE org_id = $1) AS organisation_pk,
                (SELECT id FROM users WHERE user_id = $2) AS user_pk
            "#,
        )
        .bind(organisation_id.as_uuid())
        .bind(user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        let organisation_pk: Option<i64> = row.get("organisation_pk");
        let user_pk: Option<i64> = row.get("user_pk");

        let organisation_pk =
            organisation_pk.ok_or(OrganisationError::NotFound(*organisation_id))?;
        let user_pk = user_pk.ok_or(OrganisationError::UserNotFound(*user_id))?;

        sqlx::query(
            r#"
            INSERT INTO organisation_users (organisation_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(organisation_pk)
        .bind(user_pk)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }
}
