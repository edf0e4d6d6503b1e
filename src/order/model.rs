use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema_ext::{DateTimeWrapper, UuidWrapper};

/// A denormalized order line item, embedded in the order document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub product_id: i64,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

/// An order. Created at checkout; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: i64,
    #[schema(example = "ORD-7K2M9QX1")]
    pub order_code: String,
    #[schema(value_type = Option<UuidWrapper>)]
    pub user_id: Option<Uuid>,
    /// Set only when every line item belongs to a single vendor
    #[schema(value_type = Option<UuidWrapper>)]
    pub vendor_id: Option<Uuid>,
    pub user_email: String,
    pub user_name: String,
    #[schema(value_type = Vec<OrderItem>)]
    pub items: Json<Vec<OrderItem>>,
    pub total: f64,
    #[schema(example = "pending")]
    pub status: String,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("User not found")]
    UserNotFound,
}
