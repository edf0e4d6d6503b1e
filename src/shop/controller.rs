use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use crate::auth::jwt::Role;
use crate::auth::middleware::{require_role, AuthUser};

use super::model::{CreateShopRequest, Shop, ShopError};
use super::service;

fn error_response(e: ShopError) -> axum::response::Response {
    error!("Shop operation failed: {:?}", e);
    let status = match e {
        ShopError::ValidationError(_) => StatusCode::BAD_REQUEST,
        ShopError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Register a shop for the authenticated vendor
#[utoipa::path(
    post,
    path = "/api/shops",
    request_body = CreateShopRequest,
    responses(
        (status = 201, description = "Shop registered", body = Shop),
        (status = 400, description = "Invalid shop data"),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn create_shop(
    user: AuthUser,
    State(pool): State<PgPool>,
    Json(req): Json<CreateShopRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Vendor) {
        return response;
    }

    match service::create_shop(&pool, user.user_id, req).await {
        Ok(shop) => (StatusCode::CREATED, Json(json!(shop))).into_response(),
        Err(e) => error_response(e),
    }
}

/// List the authenticated vendor's shops
#[utoipa::path(
    get,
    path = "/api/shops",
    responses(
        (status = 200, description = "Shops retrieved", body = Vec<Shop>),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    security(("bearer_auth" = [])),
    tag = "shops"
)]
pub async fn list_shops(user: AuthUser, State(pool): State<PgPool>) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Vendor) {
        return response;
    }

    match service::list_shops(&pool, user.user_id).await {
        Ok(shops) => (StatusCode::OK, Json(json!(shops))).into_response(),
        Err(e) => error_response(e),
    }
}
