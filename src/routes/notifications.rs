use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::auth::middleware::auth_middleware;
use crate::notification::{controller, service::NotificationService};

/// Set up vendor notification routes
pub fn routes(notification_service: Arc<NotificationService>) -> Router {
    Router::new()
        .route("/api/notifications", get(controller::list_notifications))
        .route("/api/notifications/logs", get(controller::list_logs))
        .route("/api/notifications/:id/read", put(controller::mark_read))
        .route_layer(middleware::from_fn(auth_middleware))
        .with_state(notification_service)
}
