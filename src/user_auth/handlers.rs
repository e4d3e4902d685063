use axum::{extract::State, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::middleware::AuthUser;
use super::service::{AuthResponse, LoginRequest, RegisterRequest};
use crate::account::PublicAccount;
use crate::error::AppResult;
use crate::gateway::extract::ApiJson;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiReply, ApiResponse, reply};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: PublicAccount,
}

/// Register a new user
///
/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Missing fields, mismatched or weak password, bad email"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> AppResult<ApiReply<AuthResponse>> {
    let resp = state.user_auth.register(req).await?;
    Ok(reply(
        StatusCode::CREATED,
        ApiResponse::success(resp).with_message("User registered successfully"),
    ))
}

/// Login user
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<ApiReply<AuthResponse>> {
    let resp = state.user_auth.login(req).await?;
    Ok(reply(
        StatusCode::OK,
        ApiResponse::success(resp).with_message("Login successful"),
    ))
}

/// Current user profile
///
/// GET /api/auth/profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Profile of the token holder", body = ApiResponse<ProfileResponse>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> AppResult<ApiReply<ProfileResponse>> {
    let user = state.user_auth.profile(user.account_id).await?;
    Ok(reply(
        StatusCode::OK,
        ApiResponse::success(ProfileResponse { user }),
    ))
}
