use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;

use crate::auth::middleware::auth_middleware;
use crate::cart::controller;

/// Set up customer cart routes
pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/api/cart", get(controller::get_cart))
        .route("/api/cart/items", post(controller::add_item))
        .route("/api/cart/items/:id", delete(controller::remove_item))
        .route_layer(middleware::from_fn(auth_middleware))
        .with_state(pool)
}
