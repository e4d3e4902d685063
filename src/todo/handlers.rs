use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::models::Todo;
use super::service::parse_todo_id;
use super::validation::{parse_filter, validate_changes, validate_new_todo};
use crate::error::AppResult;
use crate::gateway::extract::{ApiJson, ApiQuery};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiReply, ApiResponse, reply};
use crate::user_auth::middleware::AuthUser;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTodosQuery {
    /// `true` for completed todos, anything else for open ones
    pub completed: Option<String>,
    /// Case-insensitive: low, medium, high, urgent
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = "HIGH")]
    pub priority: Option<String>,
}

/// Partial update; omitted fields keep their value
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    /// `null` is rejected like an empty title
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    /// `null` clears the description
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

/// Marks a field as sent even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodoResponse {
    pub todo: Todo,
}

/// List the caller's todos
///
/// GET /api/todos
#[utoipa::path(
    get,
    path = "/api/todos",
    params(ListTodosQuery),
    responses(
        (status = 200, description = "Open todos first, newest first", body = ApiResponse<TodoListResponse>),
        (status = 400, description = "Unknown priority"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ListTodosQuery>,
) -> AppResult<ApiReply<TodoListResponse>> {
    let filter = parse_filter(query.completed.as_deref(), query.priority.as_deref())?;
    let todos = state.todos.list(user.account_id, filter).await?;
    Ok(reply(
        StatusCode::OK,
        ApiResponse::success(TodoListResponse { todos }),
    ))
}

/// Create a todo
///
/// POST /api/todos
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = ApiResponse<TodoResponse>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ApiJson(req): ApiJson<CreateTodoRequest>,
) -> AppResult<ApiReply<TodoResponse>> {
    let new = validate_new_todo(
        req.title.as_deref(),
        req.description.as_deref(),
        req.priority.as_deref(),
    )?;
    let todo = state.todos.create(user.account_id, new).await?;
    Ok(reply(
        StatusCode::CREATED,
        ApiResponse::success(TodoResponse { todo }).with_message("Todo created successfully"),
    ))
}

/// Fetch one todo
///
/// GET /api/todos/{id}
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    params(("id" = String, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo", body = ApiResponse<TodoResponse>),
        (status = 404, description = "No such todo for this user"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
pub async fn get_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<ApiReply<TodoResponse>> {
    let id = parse_todo_id(&id)?;
    let todo = state.todos.get(user.account_id, id).await?;
    Ok(reply(
        StatusCode::OK,
        ApiResponse::success(TodoResponse { todo }),
    ))
}

/// Update a todo
///
/// PUT /api/todos/{id}
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    params(("id" = String, Path, description = "Todo id")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = ApiResponse<TodoResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No such todo for this user"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateTodoRequest>,
) -> AppResult<ApiReply<TodoResponse>> {
    let id = parse_todo_id(&id)?;
    // existence is reported before validation
    state.todos.get(user.account_id, id).await?;

    let changes = validate_changes(
        req.title.as_ref().map(|t| t.as_deref()),
        req.description.as_ref().map(|d| d.as_deref()),
        req.completed,
        req.priority.as_deref(),
    )?;
    let todo = state.todos.update(user.account_id, id, changes).await?;
    Ok(reply(
        StatusCode::OK,
        ApiResponse::success(TodoResponse { todo }).with_message("Todo updated successfully"),
    ))
}

/// Delete a todo
///
/// DELETE /api/todos/{id}
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = String, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo deleted"),
        (status = 404, description = "No such todo for this user"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<ApiReply<()>> {
    let id = parse_todo_id(&id)?;
    state.todos.delete(user.account_id, id).await?;
    Ok(reply(
        StatusCode::OK,
        ApiResponse::message_only("Todo deleted successfully"),
    ))
}
