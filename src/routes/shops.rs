use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

use crate::auth::middleware::auth_middleware;
use crate::shop::controller;

/// Set up vendor shop routes
pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/api/shops", get(controller::list_shops))
        .route("/api/shops", post(controller::create_shop))
        .route_layer(middleware::from_fn(auth_middleware))
        .with_state(pool)
}
