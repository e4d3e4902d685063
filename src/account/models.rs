//! Data models for user accounts

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Stored account, including the password hash. Never serialized.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Already lowercased
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// Outward view of an account (no credential)
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: Uuid,
    #[schema(example = "user1@example.com")]
    pub email: String,
    #[schema(example = "Ada")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for PublicAccount {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id,
            email: a.email.clone(),
            name: a.name.clone(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<Account> for PublicAccount {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            email: a.email,
            name: a.name,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}
