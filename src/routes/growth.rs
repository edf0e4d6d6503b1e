use axum::{middleware, routing::post, Router};

use crate::auth::middleware::auth_middleware;
use crate::growth::controller::{self, GrowthState};

/// Set up the pipeline trigger routes
pub fn routes(state: GrowthState) -> Router {
    Router::new()
        .route("/api/growth/scan", post(controller::run_scan))
        .route(
            "/api/growth/revenue-check",
            post(controller::run_revenue_check),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .with_state(state)
}
