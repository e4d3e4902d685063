//! Repository layer for account storage

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::models::{Account, NewAccount};
use crate::error::RepositoryError;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account. `Duplicate` when the email is taken.
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepositoryError>;

    /// Exact match; callers pass the lowercased email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;
}

/// PostgreSQL-backed account repository
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(r: &PgRow) -> Result<Account, sqlx::Error> {
    Ok(Account {
        id: r.try_get("id")?,
        email: r.try_get("email")?,
        name: r.try_get("name")?,
        password_hash: r.try_get("password_hash")?,
        created_at: r.try_get("created_at")?,
        updated_at: r.try_get("updated_at")?,
    })
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query(
            r#"INSERT INTO users (id, email, name, password_hash, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $5)
               RETURNING id, email, name, password_hash, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&account.email)
        .bind(&account.name)
        .bind(&account.password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(account_from_row(&row)?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT id, email, name, password_hash, created_at, updated_at
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(account_from_row).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT id, email, name, password_hash, created_at, updated_at
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(account_from_row).transpose()?)
    }
}
