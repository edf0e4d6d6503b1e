use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use crate::auth::middleware::AuthUser;

use super::model::{AddCartItemRequest, CartError, CartResponse};
use super::service;

fn error_response(e: CartError) -> axum::response::Response {
    error!("Cart operation failed: {:?}", e);
    let status = match e {
        CartError::ProductNotFound | CartError::ItemNotFound => StatusCode::NOT_FOUND,
        CartError::ValidationError(_) => StatusCode::BAD_REQUEST,
        CartError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Get the authenticated user's cart
#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart retrieved", body = CartResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "cart"
)]
pub async fn get_cart(user: AuthUser, State(pool): State<PgPool>) -> impl IntoResponse {
    match service::get_cart(&pool, user.user_id).await {
        Ok(cart) => (StatusCode::OK, Json(json!(cart))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Add a product to the cart
#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Cart updated", body = CartResponse),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "cart"
)]
pub async fn add_item(
    user: AuthUser,
    State(pool): State<PgPool>,
    Json(req): Json<AddCartItemRequest>,
) -> impl IntoResponse {
    match service::add_item(&pool, user.user_id, req).await {
        Ok(cart) => (StatusCode::OK, Json(json!(cart))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Remove an item from the cart
#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(("id" = i64, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Item removed"),
        (status = 404, description = "Cart item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "cart"
)]
pub async fn remove_item(
    user: AuthUser,
    Path(id): Path<i64>,
    State(pool): State<PgPool>,
) -> impl IntoResponse {
    match service::remove_item(&pool, user.user_id, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Item removed from cart" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
