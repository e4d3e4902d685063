//! In-memory store
//!
//! Implements both repository traits over process-local maps. Used by the
//! test suite and by the server when no PostgreSQL URL is configured. Data
//! does not survive a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::account::{Account, AccountRepository, NewAccount};
use crate::error::RepositoryError;
use crate::todo::models::{NewTodo, Todo, TodoChanges, TodoFilter, sort_for_listing};
use crate::todo::repository::TodoRepository;

#[derive(Default)]
pub struct InMemoryStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
    todos: RwLock<HashMap<Uuid, Todo>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(RepositoryError::Duplicate("users_email_key".to_string()));
        }
        let now = Utc::now();
        let created = Account {
            id: Uuid::new_v4(),
            email: account.email,
            name: account.name,
            password_hash: account.password_hash,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepositoryError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }
}

#[async_trait]
impl TodoRepository for InMemoryStore {
    async fn list(&self, owner: Uuid, filter: TodoFilter) -> Result<Vec<Todo>, RepositoryError> {
        let mut todos: Vec<Todo> = self
            .todos
            .read()
            .await
            .values()
            .filter(|t| t.user_id == owner && filter.matches(t))
            .cloned()
            .collect();
        sort_for_listing(&mut todos);
        Ok(todos)
    }

    async fn create(&self, owner: Uuid, todo: NewTodo) -> Result<Todo, RepositoryError> {
        let now = Utc::now();
        let created = Todo {
            id: Uuid::new_v4(),
            title: todo.title,
            description: todo.description,
            completed: false,
            priority: todo.priority,
            created_at: now,
            updated_at: now,
            user_id: owner,
        };
        self.todos.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<Todo>, RepositoryError> {
        Ok(self
            .todos
            .read()
            .await
            .get(&id)
            .filter(|t| t.user_id == owner)
            .cloned())
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, RepositoryError> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.get_mut(&id).filter(|t| t.user_id == owner) else {
            return Ok(None);
        };
        changes.apply_to(todo);
        todo.updated_at = Utc::now();
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        let mut todos = self.todos.write().await;
        if todos.get(&id).is_some_and(|t| t.user_id == owner) {
            todos.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}
