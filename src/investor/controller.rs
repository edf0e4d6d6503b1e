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

use super::model::{CreateInvestmentRequest, Investment, InvestmentError};
use super::service;

fn error_response(e: InvestmentError) -> axum::response::Response {
    error!("Investment operation failed: {:?}", e);
    let status = match e {
        InvestmentError::ValidationError(_) => StatusCode::BAD_REQUEST,
        InvestmentError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Record an investment
#[utoipa::path(
    post,
    path = "/api/investments",
    request_body = CreateInvestmentRequest,
    responses(
        (status = 201, description = "Investment recorded", body = Investment),
        (status = 400, description = "Invalid investment data"),
        (status = 403, description = "Forbidden - investor access required")
    ),
    security(("bearer_auth" = [])),
    tag = "investments"
)]
pub async fn create_investment(
    user: AuthUser,
    State(pool): State<PgPool>,
    Json(req): Json<CreateInvestmentRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Investor) {
        return response;
    }

    match service::create_investment(&pool, user.user_id, req).await {
        Ok(investment) => (StatusCode::CREATED, Json(json!(investment))).into_response(),
        Err(e) => error_response(e),
    }
}

/// List the authenticated investor's investments
#[utoipa::path(
    get,
    path = "/api/investments",
    responses(
        (status = 200, description = "Investments retrieved", body = Vec<Investment>),
        (status = 403, description = "Forbidden - investor access required")
    ),
    security(("bearer_auth" = [])),
    tag = "investments"
)]
pub async fn list_investments(user: AuthUser, State(pool): State<PgPool>) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Investor) {
        return response;
    }

    match service::list_investments(&pool, user.user_id).await {
        Ok(investments) => (StatusCode::OK, Json(json!(investments))).into_response(),
        Err(e) => error_response(e),
    }
}
