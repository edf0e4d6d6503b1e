use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::auth::jwt::Role;
use crate::auth::middleware::AuthUser;

use super::model::{RevenueCheckSummary, ScanSummary};
use super::monitor::RevenueMonitor;
use super::scanner::PerformanceScanner;

#[derive(Clone)]
pub struct GrowthState {
    pub scanner: Arc<PerformanceScanner>,
    pub monitor: Arc<RevenueMonitor>,
}

fn forbidden() -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "Only admins can trigger growth jobs" })),
    )
        .into_response()
}

/// Run the vendor performance scanner (admin only)
#[utoipa::path(
    post,
    path = "/api/growth/scan",
    responses(
        (status = 200, description = "Scan completed", body = ScanSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 500, description = "Scan failed")
    ),
    security(("bearer_auth" = [])),
    tag = "growth"
)]
pub async fn run_scan(user: AuthUser, State(state): State<GrowthState>) -> impl IntoResponse {
    if user.role != Role::Admin {
        return forbidden();
    }

    match state.scanner.scan().await {
        Ok(summary) => (StatusCode::OK, Json(json!(summary))).into_response(),
        Err(e) => {
            error!("Performance scan failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Performance scan failed" })),
            )
                .into_response()
        }
    }
}

/// Run the revenue threshold monitor (admin only)
#[utoipa::path(
    post,
    path = "/api/growth/revenue-check",
    responses(
        (status = 200, description = "Revenue check completed", body = RevenueCheckSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 500, description = "Revenue check failed")
    ),
    security(("bearer_auth" = [])),
    tag = "growth"
)]
pub async fn run_revenue_check(
    user: AuthUser,
    State(state): State<GrowthState>,
) -> impl IntoResponse {
    if user.role != Role::Admin {
        return forbidden();
    }

    match state.monitor.check().await {
        Ok(summary) => (StatusCode::OK, Json(json!(summary))).into_response(),
        Err(e) => {
            error!("Revenue check failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Revenue check failed" })),
            )
                .into_response()
        }
    }
}
