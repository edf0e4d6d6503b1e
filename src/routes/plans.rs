use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

use crate::auth::middleware::auth_middleware;
use crate::plan::controller;

/// Set up weekly growth plan routes
pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/api/plans", get(controller::list_plans))
        .route("/api/plans", post(controller::create_plan))
        .route_layer(middleware::from_fn(auth_middleware))
        .with_state(pool)
}
