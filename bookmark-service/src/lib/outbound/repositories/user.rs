use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::identity::errors::UserStoreError;
use crate::domain::identity::models::StoredIdentity;
use crate::domain::identity::ports::IdentityRegistry;
use crate::domain::identity::ports::UserStore;

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IdentityRow {
    id: String,
    email: String,
    password: String,
}

impl From<IdentityRow> for StoredIdentity {
    fn from(row: IdentityRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password,
        }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_email(&self, email: &str) -> Result<StoredIdentity, UserStoreError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id::text AS id, email, password
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Database(e.to_string()))?;

        row.map(StoredIdentity::from)
            .ok_or_else(|| UserStoreError::NotFound(email.to_string()))
    }
}

#[async_trait]
impl IdentityRegistry for PostgresUserStore {
    async fn create(&self, identity: StoredIdentity) -> Result<StoredIdentity, UserStoreError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO users (id, email, password, created_at)
            VALUES ($1::uuid, $2, $3, now())
            RETURNING id::text AS id, email, password
            "#,
        )
        .bind(&identity.id)
        .bind(&identity.email)
        .bind(&identity.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return UserStoreError::EmailAlreadyExists(identity.email.clone());
                }
            }
            UserStoreError::Database(e.to_string())
        })?;

        Ok(row.into())
    }
}
