//! Owner-scoped todo operations

use std::sync::Arc;

use uuid::Uuid;

use super::models::{NewTodo, Todo, TodoChanges, TodoFilter};
use super::repository::TodoRepository;
use crate::error::{AppError, AppResult};

const TODO_NOT_FOUND: &str = "Todo not found";

fn not_found() -> AppError {
    AppError::not_found(TODO_NOT_FOUND)
}

/// Path ids that are not UUIDs cannot name any todo
pub fn parse_todo_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

pub struct TodoService {
    todos: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }

    pub async fn list(&self, owner: Uuid, filter: TodoFilter) -> AppResult<Vec<Todo>> {
        Ok(self.todos.list(owner, filter).await?)
    }

    pub async fn create(&self, owner: Uuid, todo: NewTodo) -> AppResult<Todo> {
        let todo = self.todos.create(owner, todo).await?;
        tracing::debug!(todo_id = %todo.id, owner = %owner, "Todo created");
        Ok(todo)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> AppResult<Todo> {
        self.todos.find(owner, id).await?.ok_or_else(not_found)
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, changes: TodoChanges) -> AppResult<Todo> {
        self.todos
            .update(owner, id, changes)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        if self.todos.delete(owner, id).await? {
            tracing::debug!(todo_id = %id, owner = %owner, "Todo deleted");
            Ok(())
        } else {
            Err(not_found())
        }
    }
}
