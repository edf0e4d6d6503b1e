use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use crate::auth::middleware::AuthUser;

use super::model::{Order, OrderError};
use super::service;

fn error_response(e: OrderError) -> axum::response::Response {
    error!("Order operation failed: {:?}", e);
    let status = match e {
        OrderError::EmptyCart => StatusCode::BAD_REQUEST,
        OrderError::UserNotFound => StatusCode::NOT_FOUND,
        OrderError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Turn the authenticated user's cart into an order
#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, description = "Cart is empty"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn checkout(user: AuthUser, State(pool): State<PgPool>) -> impl IntoResponse {
    match service::checkout(&pool, user.user_id).await {
        Ok(order) => (StatusCode::CREATED, Json(json!(order))).into_response(),
        Err(e) => error_response(e),
    }
}

/// List the authenticated user's orders
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Orders retrieved", body = Vec<Order>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn list_orders(user: AuthUser, State(pool): State<PgPool>) -> impl IntoResponse {
    match service::list_orders(&pool, user.user_id).await {
        Ok(orders) => (StatusCode::OK, Json(json!(orders))).into_response(),
        Err(e) => error_response(e),
    }
}
