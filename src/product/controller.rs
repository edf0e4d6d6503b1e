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

use super::model::{CreateProductRequest, Product, ProductError, UpdateProductRequest};
use super::service::ProductService;

fn error_response(e: ProductError) -> axum::response::Response {
    error!("Product operation failed: {:?}", e);
    let status = match e {
        ProductError::NotFound | ProductError::ShopNotFound => StatusCode::NOT_FOUND,
        ProductError::Unauthorized => StatusCode::FORBIDDEN,
        ProductError::ValidationError(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Add a product to one of the vendor's shops
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid product data"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Shop not found")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    user: AuthUser,
    State(service): State<Arc<ProductService>>,
    Json(req): Json<CreateProductRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Vendor) {
        return response;
    }

    match service.create_product(user.user_id, req).await {
        Ok(product) => (StatusCode::CREATED, Json(json!(product))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Public catalog listing
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Catalog retrieved", body = Vec<Product>)
    ),
    tag = "products"
)]
pub async fn list_products(State(service): State<Arc<ProductService>>) -> impl IntoResponse {
    match service.list_catalog().await {
        Ok(products) => (StatusCode::OK, Json(json!(products))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Get a single product
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product retrieved", body = Product),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    Path(id): Path<i64>,
    State(service): State<Arc<ProductService>>,
) -> impl IntoResponse {
    match service.get_product(id).await {
        Ok(product) => (StatusCode::OK, Json(json!(product))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Update a product the vendor owns
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn update_product(
    user: AuthUser,
    Path(id): Path<i64>,
    State(service): State<Arc<ProductService>>,
    Json(req): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_role(&user, Role::Vendor) {
        return response;
    }

    match service.update_product(user.user_id, id, req).await {
        Ok(product) => (StatusCode::OK, Json(json!(product))).into_response(),
        Err(e) => error_response(e),
    }
}
