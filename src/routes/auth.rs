use crate::auth::controller;
use axum::{routing::post, Router};
use sqlx::PgPool;

/// Authentication routes for registration and login
pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/api/auth/register", post(controller::register))
        .route("/api/auth/login", post(controller::login))
        .with_state(pool)
}
