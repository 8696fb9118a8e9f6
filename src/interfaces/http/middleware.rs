//! Authentication middleware for Axum
//!
//! Two stacked gates, mirroring the route table: `auth_middleware` verifies
//! the bearer token and attaches the caller to the request;
//! `admin_middleware` runs after it and consults the authorization policy.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::ApiError;
use crate::auth::jwt::{verify_token, JwtConfig};
use crate::auth::policy::{authorize, RequiredRole, Role};

/// Authentication state containing the JWT config
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Authenticated caller, decoded from token claims
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub role: Role,
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware - requires a valid bearer token
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return ApiError::Forbidden("No token provided").into_response();
    };

    let Some(token) = extract_token(&auth_header) else {
        return ApiError::Forbidden("No token provided").into_response();
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            let Some(role) = Role::parse(&claims.role) else {
                return ApiError::Forbidden("Invalid token").into_response();
            };

            let user = AuthenticatedUser {
                user_id: claims.sub,
                role,
            };
            request.extensions_mut().insert(user);

            next.run(request).await
        }
        Err(_) => ApiError::Forbidden("Token verification failed").into_response(),
    }
}

/// Admin-only middleware - must be layered after `auth_middleware`
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    let user = request.extensions().get::<AuthenticatedUser>();

    match user {
        Some(user) if authorize(user.role, RequiredRole::Admin) => next.run(request).await,
        Some(_) => ApiError::Forbidden("Access denied. Requires Admin Role").into_response(),
        None => ApiError::Forbidden("No token provided").into_response(),
    }
}
