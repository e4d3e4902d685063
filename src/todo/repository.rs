//! Repository layer for todo storage
//!
//! Every lookup is keyed by `(id, owner)`. A todo owned by someone else is
//! never returned, updated or deleted.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use uuid::Uuid;

use super::models::{NewTodo, Priority, Todo, TodoChanges, TodoFilter};
use crate::error::RepositoryError;

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Owner's todos matching `filter`: incomplete first, newest first
    async fn list(&self, owner: Uuid, filter: TodoFilter) -> Result<Vec<Todo>, RepositoryError>;

    async fn create(&self, owner: Uuid, todo: NewTodo) -> Result<Todo, RepositoryError>;

    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<Todo>, RepositoryError>;

    /// `None` when no such todo is owned by `owner`
    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, RepositoryError>;

    /// `false` when no such todo is owned by `owner`
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, RepositoryError>;
}

/// PostgreSQL-backed todo repository
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TODO_COLUMNS: &str =
    "id, title, description, completed, priority, created_at, updated_at, user_id";

fn todo_from_row(r: &PgRow) -> Result<Todo, sqlx::Error> {
    let priority: String = r.try_get("priority")?;
    let priority = priority
        .parse::<Priority>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    Ok(Todo {
        id: r.try_get("id")?,
        title: r.try_get("title")?,
        description: r.try_get("description")?,
        completed: r.try_get("completed")?,
        priority,
        created_at: r.try_get("created_at")?,
        updated_at: r.try_get("updated_at")?,
        user_id: r.try_get("user_id")?,
    })
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn list(&self, owner: Uuid, filter: TodoFilter) -> Result<Vec<Todo>, RepositoryError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM todos WHERE user_id = ", TODO_COLUMNS));
        qb.push_bind(owner);
        if let Some(completed) = filter.completed {
            qb.push(" AND completed = ").push_bind(completed);
        }
        if let Some(priority) = filter.priority {
            qb.push(" AND priority = ").push_bind(priority.as_str());
        }
        qb.push(" ORDER BY completed ASC, created_at DESC");

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(todo_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn create(&self, owner: Uuid, todo: NewTodo) -> Result<Todo, RepositoryError> {
        let now = Utc::now();
        let sql = format!(
            r#"INSERT INTO todos (id, title, description, completed, priority, created_at, updated_at, user_id)
               VALUES ($1, $2, $3, FALSE, $4, $5, $5, $6)
               RETURNING {}"#,
            TODO_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.priority.as_str())
            .bind(now)
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(todo_from_row(&row)?)
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<Todo>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM todos WHERE id = $1 AND user_id = $2",
            TODO_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(todo_from_row).transpose()?)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, RepositoryError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE todos SET updated_at = ");
        qb.push_bind(Utc::now());
        if let Some(title) = changes.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(description) = changes.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(completed) = changes.completed {
            qb.push(", completed = ").push_bind(completed);
        }
        if let Some(priority) = changes.priority {
            qb.push(", priority = ").push_bind(priority.as_str());
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" AND user_id = ").push_bind(owner);
        qb.push(format!(" RETURNING {}", TODO_COLUMNS));

        let row = qb.build().fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(todo_from_row).transpose()?)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        let res = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
