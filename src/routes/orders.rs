use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

use crate::auth::middleware::auth_middleware;
use crate::order::controller;

/// Set up checkout and order routes
pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/api/orders", get(controller::list_orders))
        .route("/api/orders/checkout", post(controller::checkout))
        .route_layer(middleware::from_fn(auth_middleware))
        .with_state(pool)
}
