//! knots - multi-user todo list API
//!
//! # Modules
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - Error taxonomy and its HTTP mapping
//! - [`db`] - PostgreSQL pool and schema
//! - [`account`] - Account records and registration/login input rules
//! - [`user_auth`] - Password hashing, identity tokens, access gate, auth operations
//! - [`todo`] - Owner-scoped todo CRUD
//! - [`memory`] - In-memory repositories
//! - [`gateway`] - axum router, response envelope, OpenAPI

pub mod account;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod memory;
pub mod todo;
pub mod user_auth;

pub use config::AppConfig;
pub use error::{AppError, AppResult, RepositoryError};
pub use gateway::{build_router, run_server, state::AppState};
