//! Owner-scoped todo items

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

pub use models::{NewTodo, Priority, Todo, TodoChanges, TodoFilter};
pub use repository::{PgTodoRepository, TodoRepository};
pub use service::TodoService;
