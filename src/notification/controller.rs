use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::auth::jwt::Role;
use crate::auth::middleware::{require_role, AuthUser};

use super::model::{Notification, NotificationError, NotificationLog};
use super::service::NotificationService;

const LOG_LIST_LIMIT: i64 = 200;

fn error_status(e: &NotificationError) -> StatusCode {
    match e {
        NotificationError::NotFound => StatusCode::NOT_FOUND,
        NotificationError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// List the authenticated vendor's notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications retrieved", body = Vec<Notification>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn list_notifications(
    user: AuthUser,
    State(service): State<Arc<NotificationService>>,
) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Vendor) {
        return response;
    }

    match service.list_for_vendor(user.user_id).await {
        Ok(notifications) => (StatusCode::OK, Json(json!(notifications))).into_response(),
        Err(e) => {
            error!("Failed to list notifications: {:?}", e);
            (
                error_status(&e),
                Json(json!({ "error": format!("Failed to list notifications: {}", e) })),
            )
                .into_response()
        }
    }
}

/// Mark one of the vendor's notifications as read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found")
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn mark_read(
    user: AuthUser,
    Path(id): Path<i64>,
    State(service): State<Arc<NotificationService>>,
) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Vendor) {
        return response;
    }

    match service.mark_read(user.user_id, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Notification marked read" })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to mark notification {} read: {:?}", id, e);
            (
                error_status(&e),
                Json(json!({ "error": format!("Failed to mark notification read: {}", e) })),
            )
                .into_response()
        }
    }
}

/// Delivery-attempt audit log (admin only)
#[utoipa::path(
    get,
    path = "/api/notifications/logs",
    responses(
        (status = 200, description = "Audit log retrieved", body = Vec<NotificationLog>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn list_logs(
    user: AuthUser,
    State(service): State<Arc<NotificationService>>,
) -> impl IntoResponse {
    if user.role != Role::Admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Only admins can read the notification audit log" })),
        )
            .into_response();
    }

    match service.list_logs(LOG_LIST_LIMIT).await {
        Ok(logs) => (StatusCode::OK, Json(json!(logs))).into_response(),
        Err(e) => {
            error!("Failed to list notification logs: {:?}", e);
            (
                error_status(&e),
                Json(json!({ "error": format!("Failed to list notification logs: {}", e) })),
            )
                .into_response()
        }
    }
}
