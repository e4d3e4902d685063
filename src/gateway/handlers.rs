//! Gateway-level handlers: health and the API fallbacks

pub mod health;

pub use health::{HealthResponse, health_check};

use crate::error::AppError;

/// Unknown route
pub async fn fallback() -> AppError {
    AppError::not_found("Not found")
}

/// Known route, unsupported method
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
