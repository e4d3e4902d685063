//! Error taxonomy shared by every operation.
//!
//! Operations return [`AppError`]; the gateway turns it into the response
//! envelope with the matching HTTP status. Internal details are logged and
//! never sent to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::gateway::types::ApiResponse;

/// Message returned for every 500
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed, missing or out-of-range input (400)
    #[error("{0}")]
    Validation(String),

    /// Missing, malformed, expired or invalid token, or bad credentials (401)
    #[error("{0}")]
    Authentication(String),

    /// Entity absent or not owned by the caller (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate registration (409)
    #[error("{0}")]
    Conflict(String),

    /// Known route, unsupported method (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Deployment precondition not met
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything unexpected (500)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller
    pub fn public_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => tracing::error!("Request failed: {:?}", e),
            Self::Config(msg) => tracing::error!("Configuration error: {}", msg),
            _ => {}
        }
        let status = self.http_status();
        (status, Json(ApiResponse::<()>::error(self.public_message()))).into_response()
    }
}

/// Storage-layer failures, translated into [`AppError`] by the services
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Duplicate value for unique field: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Duplicate(db.constraint().unwrap_or("unknown").to_string())
            }
            _ => Self::Database(e),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        Self::Internal(anyhow::Error::new(e))
    }
}

pub type AppResult<T> = Result<T, AppError>;
