//! Access gate and per-operation identity resolution.
//!
//! The gate only checks that a protected API request carries a token at all.
//! Whether the token is valid is decided later by [`AuthUser`], which every
//! protected handler takes as an argument.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use uuid::Uuid;

use super::token::extract_bearer;
use crate::error::AppError;
use crate::gateway::state::AppState;

const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/auth/register", "/api/health"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// API route reachable without a token
    Public,
    /// API route that needs a token
    Protected,
    /// Anything outside `/api`; never blocked here
    Page,
}

pub fn classify_path(path: &str) -> RouteAccess {
    let is_api = path == "/api" || path.starts_with("/api/");
    if !is_api {
        return RouteAccess::Page;
    }
    let is_public = PUBLIC_API_ROUTES
        .iter()
        .any(|route| path == *route || path.starts_with(&format!("{}/", route)));
    if is_public {
        RouteAccess::Public
    } else {
        RouteAccess::Protected
    }
}

/// Raw token found by the gate, handed to [`AuthUser`]
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Bearer header first, then the configured cookie
pub fn find_token(request: &Request<Body>, cookie_name: &str) -> Option<String> {
    let from_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer)
        .map(str::to_string);

    from_header.or_else(|| {
        CookieJar::from_headers(request.headers())
            .get(cookie_name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    })
}

pub async fn access_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if classify_path(request.uri().path()) != RouteAccess::Protected {
        return Ok(next.run(request).await);
    }

    let Some(token) = find_token(&request, &state.cookie_name) else {
        tracing::warn!(
            path = %request.uri().path(),
            "Rejected protected request without token"
        );
        return Err(AppError::unauthorized("Authentication required"));
    };

    request.extensions_mut().insert(BearerToken(token));
    Ok(next.run(request).await)
}

/// Identity of the caller, resolved from a verified token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub email: String,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Routes mounted without the gate still accept the header
        let token = match parts.extensions.get::<BearerToken>() {
            Some(t) => t.0.clone(),
            None => parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(extract_bearer)
                .map(str::to_string)
                .ok_or_else(|| AppError::unauthorized("Authorization token required"))?,
        };

        let identity = state.tokens.verify(&token).map_err(|e| {
            tracing::warn!("Token rejected: {}", e);
            AppError::from(e)
        })?;

        Ok(AuthUser {
            account_id: identity.account_id,
            email: identity.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_path() {
        assert_eq!(classify_path("/api/auth/login"), RouteAccess::Public);
        assert_eq!(classify_path("/api/auth/register"), RouteAccess::Public);
        assert_eq!(classify_path("/api/health"), RouteAccess::Public);
        assert_eq!(classify_path("/api/auth/profile"), RouteAccess::Protected);
        assert_eq!(classify_path("/api/todos"), RouteAccess::Protected);
        assert_eq!(classify_path("/api/todos/123"), RouteAccess::Protected);
        assert_eq!(classify_path("/api"), RouteAccess::Protected);
        assert_eq!(classify_path("/api/auth/login-as-admin"), RouteAccess::Protected);
        assert_eq!(classify_path("/"), RouteAccess::Page);
        assert_eq!(classify_path("/dashboard"), RouteAccess::Page);
        assert_eq!(classify_path("/docs"), RouteAccess::Page);
        assert_eq!(classify_path("/api-docs/openapi.json"), RouteAccess::Page);
    }

    fn request_with(headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/todos");
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_find_token_prefers_header() {
        let req = request_with(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "knots_token=from-cookie"),
        ]);
        assert_eq!(find_token(&req, "knots_token").as_deref(), Some("from-header"));
    }

    #[test]
    fn test_find_token_cookie_fallback() {
        let req = request_with(&[("cookie", "theme=dark; knots_token=from-cookie")]);
        assert_eq!(find_token(&req, "knots_token").as_deref(), Some("from-cookie"));

        let req = request_with(&[
            ("authorization", "Basic dXNlcjpwdw=="),
            ("cookie", "knots_token=from-cookie"),
        ]);
        assert_eq!(find_token(&req, "knots_token").as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_find_token_absent() {
        assert_eq!(find_token(&request_with(&[]), "knots_token"), None);
        let req = request_with(&[("authorization", "Token abc"), ("cookie", "other=1")]);
        assert_eq!(find_token(&req, "knots_token"), None);
        let req = request_with(&[("cookie", "knots_token=")]);
        assert_eq!(find_token(&req, "knots_token"), None);
    }
}
