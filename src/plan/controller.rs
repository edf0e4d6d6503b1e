use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use crate::auth::jwt::Role;
use crate::auth::middleware::{require_role, AuthUser};

use super::model::{CreatePlanRequest, PlanError, WeeklyPlan};
use super::service;

fn error_response(e: PlanError) -> axum::response::Response {
    error!("Plan operation failed: {:?}", e);
    let status = match e {
        PlanError::ValidationError(_) => StatusCode::BAD_REQUEST,
        PlanError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Submit a weekly growth plan
#[utoipa::path(
    post,
    path = "/api/plans",
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Plan submitted", body = WeeklyPlan),
        (status = 400, description = "Invalid plan data"),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    security(("bearer_auth" = [])),
    tag = "plans"
)]
pub async fn create_plan(
    user: AuthUser,
    State(pool): State<PgPool>,
    Json(req): Json<CreatePlanRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Vendor) {
        return response;
    }

    match service::create_plan(&pool, user.user_id, req).await {
        Ok(plan) => (StatusCode::CREATED, Json(json!(plan))).into_response(),
        Err(e) => error_response(e),
    }
}

/// List the authenticated vendor's weekly plans
#[utoipa::path(
    get,
    path = "/api/plans",
    responses(
        (status = 200, description = "Plans retrieved", body = Vec<WeeklyPlan>),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    security(("bearer_auth" = [])),
    tag = "plans"
)]
pub async fn list_plans(user: AuthUser, State(pool): State<PgPool>) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Vendor) {
        return response;
    }

    match service::list_plans(&pool, user.user_id).await {
        Ok(plans) => (StatusCode::OK, Json(json!(plans))).into_response(),
        Err(e) => error_response(e),
    }
}
