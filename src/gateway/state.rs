use std::sync::Arc;

use crate::account::{AccountRepository, PgAccountRepository};
use crate::db::Database;
use crate::memory::InMemoryStore;
use crate::todo::repository::{PgTodoRepository, TodoRepository};
use crate::todo::service::TodoService;
use crate::user_auth::password::PasswordService;
use crate::user_auth::service::UserAuthService;
use crate::user_auth::token::TokenService;

/// Gateway application state (shared across requests)
pub struct AppState {
    pub user_auth: UserAuthService,
    pub todos: TodoService,
    pub tokens: Arc<TokenService>,
    /// Cookie the access gate falls back to
    pub cookie_name: String,
    /// PostgreSQL pool; `None` when running on the in-memory store
    pub pg_db: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        todos: Arc<dyn TodoRepository>,
        passwords: PasswordService,
        tokens: Arc<TokenService>,
        cookie_name: String,
        pg_db: Option<Arc<Database>>,
    ) -> Self {
        Self {
            user_auth: UserAuthService::new(accounts, passwords, tokens.clone()),
            todos: TodoService::new(todos),
            tokens,
            cookie_name,
            pg_db,
        }
    }

    /// Repositories over the shared PostgreSQL pool
    pub fn with_postgres(
        db: Arc<Database>,
        passwords: PasswordService,
        tokens: Arc<TokenService>,
        cookie_name: String,
    ) -> Self {
        let accounts = Arc::new(PgAccountRepository::new(db.pool().clone()));
        let todos = Arc::new(PgTodoRepository::new(db.pool().clone()));
        Self::new(accounts, todos, passwords, tokens, cookie_name, Some(db))
    }

    /// One in-memory store backing both repositories
    pub fn in_memory(
        passwords: PasswordService,
        tokens: Arc<TokenService>,
        cookie_name: String,
    ) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store, passwords, tokens, cookie_name, None)
    }
}
