use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::page::PageRequest;
use crate::identity::errors::IdentityError;
use crate::identity::models::EmailAddress;
use crate::identity::models::FullName;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::RoleCounts;
use crate::identity::ports::CredentialStore;

const IDENTITY_COLUMNS: &str = "id, full_name, email, password_hash, role, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    full_name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = IdentityError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        Ok(Identity {
            id: IdentityId(row.id),
            full_name: FullName::new(&row.full_name)?,
            email: EmailAddress::new(&row.email)?,
            password_hash: row.password_hash,
            role: parse_role(&row.role)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_role(raw: &str) -> Result<Role, IdentityError> {
    raw.parse::<Role>()
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))
}

fn database_error(e: sqlx::Error) -> IdentityError {
    IdentityError::DatabaseError(e.to_string())
}

/// Credential store backed by the `identities` table.
///
/// Emails are unique through an index on `lower(email)`.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn insert(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities (id, full_name, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.full_name.as_str())
        .bind(identity.email.as_str())
        .bind(&identity.password_hash)
        .bind(identity.role.as_str())
        .bind(identity.created_at)
        .bind(identity.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return IdentityError::EmailTaken;
                }
            }
            database_error(e)
        })?;

        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        let row: Option<IdentityRow> = sqlx::query_as(&format!(
            "SELECT {} FROM identities WHERE id = $1",
            IDENTITY_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Identity::try_from).transpose()
    }

    async fn find_by_email_case_insensitive(
        &self,
        email: &str,
    ) -> Result<Option<Identity>, IdentityError> {
        let row: Option<IdentityRow> = sqlx::query_as(&format!(
            "SELECT {} FROM identities WHERE lower(email) = lower($1)",
            IDENTITY_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Identity::try_from).transpose()
    }

    async fn list(
        &self,
        page: &PageRequest,
        role: Option<Role>,
    ) -> Result<(Vec<Identity>, u64), IdentityError> {
        let role = role.map(|r| r.as_str());

        let rows: Vec<IdentityRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM identities
            WHERE ($1::TEXT IS NULL OR role = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            IDENTITY_COLUMNS
        ))
        .bind(role)
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM identities WHERE ($1::TEXT IS NULL OR role = $1)",
        )
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        let identities = rows
            .into_iter()
            .map(Identity::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((identities, total as u64))
    }

    async fn count_by_role(&self) -> Result<RoleCounts, IdentityError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT role, COUNT(*) FROM identities GROUP BY role")
                .fetch_all(&self.pool)
                .await
                .map_err(database_error)?;

        let mut counts = RoleCounts::default();
        for (role, count) in rows {
            counts.add(parse_role(&role)?, count as u64);
        }

        Ok(counts)
    }
}
