use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::auth::jwt::Role;
use crate::auth::middleware::{require_role, AuthUser};

use super::model::RevenueSummary;
use super::service::RevenueService;

/// Current-month revenue summary for the authenticated vendor
#[utoipa::path(
    get,
    path = "/api/revenue/summary",
    responses(
        (status = 200, description = "Revenue summary retrieved", body = RevenueSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    security(("bearer_auth" = [])),
    tag = "revenue"
)]
pub async fn vendor_summary(
    user: AuthUser,
    State(service): State<Arc<RevenueService>>,
) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Vendor) {
        return response;
    }

    match service.vendor_summary(user.user_id).await {
        Ok(summary) => (StatusCode::OK, Json(json!(summary))).into_response(),
        Err(e) => {
            error!("Failed to compute revenue summary: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to compute revenue summary" })),
            )
                .into_response()
        }
    }
}
