//! User authentication
//!
//! Password hashing, identity tokens, the access gate, and the
//! register/login/profile operations built on them.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use middleware::{AuthUser, access_gate};
pub use password::PasswordService;
pub use service::UserAuthService;
pub use token::{Identity, TokenError, TokenService, extract_bearer};
