use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

use crate::auth::middleware::auth_middleware;
use crate::investor::controller;

/// Set up investor routes
pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/api/investments", get(controller::list_investments))
        .route("/api/investments", post(controller::create_investment))
        .route_layer(middleware::from_fn(auth_middleware))
        .with_state(pool)
}
