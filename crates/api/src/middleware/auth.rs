//! Authentication middleware for protected routes.
//!
//! The frontend passes the bearer token in a custom `x-auth-token` header on
//! every protected call. The middleware validates the token, parses the role
//! claim into the closed role set, and stores a typed context in request
//! extensions for handlers to extract.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use corpspend_core::policy::Role;

/// Header carrying the bearer token.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated request context derived from validated claims.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The authenticated user's role.
    pub role: Role,
    /// Display name, present on tokens issued at login.
    pub display_name: Option<String>,
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "msg": message }))).into_response()
}

/// Authentication middleware that validates bearer tokens.
///
/// This middleware:
/// 1. Reads the token from the `x-auth-token` header
/// 2. Validates it using the JWT service
/// 3. Parses the role claim into the closed role set
/// 4. Stores an `AuthContext` in request extensions for handlers
///
/// Invalid and expired tokens get the same response; only a missing header
/// is reported differently.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
    else {
        return unauthorized("No token, authorization denied");
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(_) => return unauthorized("Token is not valid"),
    };

    // A token whose role claim is outside the closed set is as good as forged.
    let Some(role) = Role::parse(&claims.role) else {
        return unauthorized("Token is not valid");
    };

    request.extensions_mut().insert(AuthContext {
        user_id: claims.user_id(),
        role,
        display_name: claims.name,
    });
    next.run(request).await
}

/// Extractor for the authenticated user's context.
///
/// Use this in handlers to get the authenticated user:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

impl AuthUser {
    /// Returns the authenticated user's ID.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.0.user_id
    }

    /// Returns the authenticated user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.0.role
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "msg": "No token, authorization denied" })),
                )
            })
    }
}
