use axum::{
    extract::State, http::StatusCode, middleware::from_fn, response::IntoResponse, routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use sqlx::{FromRow, PgPool};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::jwt::Role;
use crate::auth::middleware::{auth_middleware, AuthUser};
use crate::schema_ext::{DateTimeWrapper, UuidWrapper};

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct UserSummary {
    #[schema(value_type = UuidWrapper)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub business_type: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
}

/// List every account (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Accounts retrieved", body = Vec<UserSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_users(user: AuthUser, State(pool): State<PgPool>) -> impl IntoResponse {
    if user.role != Role::Admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Only admins can list accounts" })),
        )
            .into_response();
    }

    let users = sqlx::query_as::<_, UserSummary>(
        "SELECT id, name, email, role, business_type, phone, created_at \
         FROM global.users ORDER BY created_at DESC",
    )
    .fetch_all(&pool)
    .await;

    match users {
        Ok(users) => (StatusCode::OK, Json(json!(users))).into_response(),
        Err(e) => {
            error!("Failed to list accounts: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to list accounts" })),
            )
                .into_response()
        }
    }
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/api/admin/users", get(list_users))
        .route_layer(from_fn(auth_middleware))
        .with_state(pool)
}
