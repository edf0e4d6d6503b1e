use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::middleware::auth_middleware;
use crate::cache::redis::RedisCache;
use crate::product::{controller, service::ProductService};

/// Set up product catalog routes
pub fn routes(pool: PgPool, redis_cache: Option<RedisCache>) -> Router {
    let product_service = Arc::new(ProductService::new(pool, redis_cache));

    Router::new()
        .route("/api/products", get(controller::list_products))
        .route("/api/products/:id", get(controller::get_product))
        .route(
            "/api/products",
            post(controller::create_product).route_layer(middleware::from_fn(auth_middleware)),
        )
        .route(
            "/api/products/:id",
            put(controller::update_product).route_layer(middleware::from_fn(auth_middleware)),
        )
        .with_state(product_service)
}
