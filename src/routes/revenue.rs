use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::auth::middleware::auth_middleware;
use crate::revenue::{controller, service::RevenueService};

/// Set up vendor revenue routes
pub fn routes(revenue_service: Arc<RevenueService>) -> Router {
    Router::new()
        .route("/api/revenue/summary", get(controller::vendor_summary))
        .route_layer(middleware::from_fn(auth_middleware))
        .with_state(revenue_service)
}
