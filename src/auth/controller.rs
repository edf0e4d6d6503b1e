use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{error, info};
use utoipa::ToSchema;

use super::service::{self, AuthError, AuthResult, LoginData, RegisterData};

// Request DTOs
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// "admin", "vendor", "customer" or "investor"; defaults to customer
    pub role: Option<String>,
    pub business_type: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Response DTOs
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

fn to_response(result: AuthResult) -> AuthResponse {
    AuthResponse {
        user_id: result.user_id.to_string(),
        name: result.name,
        email: result.email,
        role: result.role,
        token: result.token,
    }
}

fn handle_error(error: AuthError) -> Response {
    let status = error.status_code();
    let message = error.message();

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Internal server error: {}", message);
    } else {
        info!("Auth error: {} ({})", message, status);
    }

    let details = match &error {
        AuthError::DatabaseError(details) => {
            Some(format!("Database operation failed: {}", details))
        }
        _ => None,
    };

    (
        status,
        Json(ErrorResponse {
            error: message,
            details,
        }),
    )
        .into_response()
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered successfully", body = AuthResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    tag = "authentication"
)]
pub async fn register(State(pool): State<PgPool>, Json(req): Json<RegisterRequest>) -> Response {
    info!("Registration request received for email: {}", req.email);

    let data = RegisterData {
        name: req.name,
        email: req.email,
        password: req.password,
        role: req.role,
        business_type: req.business_type,
        phone: req.phone,
    };

    match service::register(&pool, data).await {
        Ok(result) => {
            let response = to_response(result);
            info!("Account registered successfully: {}", response.user_id);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(error) => handle_error(error),
    }
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "authentication"
)]
pub async fn login(State(pool): State<PgPool>, Json(req): Json<LoginRequest>) -> Response {
    info!("Login request received for email: {}", req.email);

    let data = LoginData {
        email: req.email,
        password: req.password,
    };

    match service::login(&pool, data).await {
        Ok(result) => {
            let response = to_response(result);
            info!("User login successful: {}", response.user_id);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => handle_error(error),
    }
}
