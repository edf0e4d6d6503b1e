use axum::{
    async_trait,
    extract::FromRequestParts,
    headers::{authorization::Bearer, Authorization},
    http::{request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    RequestPartsExt, TypedHeader,
};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use super::jwt::{validate_token, Role};

/// Authenticated account information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    error: String,
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Authentication middleware to protect routes
pub async fn auth_middleware<B>(req: Request<B>, next: Next<B>) -> Result<Response, Response> {
    let (mut parts, body) = req.into_parts();

    let bearer = match parts.extract::<TypedHeader<Authorization<Bearer>>>().await {
        Ok(TypedHeader(Authorization(bearer))) => bearer,
        Err(e) => {
            error!("Authorization header extraction failed: {:?}", e);
            return Err(unauthorized(
                "Missing or invalid Authorization header. Please provide a Bearer token",
            ));
        }
    };

    let claims = match validate_token(bearer.token()) {
        Ok(claims) => claims,
        Err(e) => {
            error!("Token validation failed: {:?}", e);
            return Err(unauthorized("Invalid token. Please login again"));
        }
    };

    let user_id = match Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(e) => {
            error!("User ID parsing failed: {:?}", e);
            return Err(unauthorized("Invalid user identifier in token"));
        }
    };

    info!(
        "User authenticated: {} with role {:?}",
        user_id, claims.role
    );

    parts.extensions.insert(AuthUser {
        user_id,
        role: claims.role,
    });

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Extractor for authenticated user
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| unauthorized("Authentication required"))
    }
}

/// Role check helper used by controllers that gate a whole operation on a role.
/// Admins pass every check.
pub fn require_role(user: &AuthUser, role: Role) -> Result<(), Response> {
    if user.role == Role::Admin || user.role == role {
        return Ok(());
    }
    error!(
        "Insufficient permissions for user: {} with role {:?}, required role: {:?}",
        user.user_id, user.role, role
    );
    Err((
        StatusCode::FORBIDDEN,
        Json(AuthErrorResponse {
            error: format!("Insufficient permissions. Required role: {:?}", role),
        }),
    )
        .into_response())
}
