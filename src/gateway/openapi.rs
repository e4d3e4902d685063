//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::PublicAccount;
use crate::gateway::handlers::HealthResponse;
use crate::todo::handlers::{CreateTodoRequest, TodoListResponse, TodoResponse, UpdateTodoRequest};
use crate::todo::models::{Priority, Todo};
use crate::user_auth::handlers::ProfileResponse;
use crate::user_auth::service::{AuthResponse, LoginRequest, RegisterRequest};

/// Bearer JWT security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token from /api/auth/login or /api/auth/register, valid for 7 days",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Knots Todo API",
        version = "0.1.0",
        description = "Accounts, bearer tokens and owner-scoped todos.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::profile,
        crate::todo::handlers::list_todos,
        crate::todo::handlers::create_todo,
        crate::todo::handlers::get_todo,
        crate::todo::handlers::update_todo,
        crate::todo::handlers::delete_todo,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            ProfileResponse,
            PublicAccount,
            Priority,
            Todo,
            CreateTodoRequest,
            UpdateTodoRequest,
            TodoResponse,
            TodoListResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and profile"),
        (name = "Todos", description = "Owner-scoped todo CRUD (bearer token required)"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
