//! Account management module
//!
//! Account records, their storage, and registration/login input rules.

pub mod models;
pub mod repository;
pub mod validation;

pub use models::{Account, NewAccount, PublicAccount};
pub use repository::{AccountRepository, PgAccountRepository};
