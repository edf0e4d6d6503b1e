use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema_ext::{DateTimeWrapper, UuidWrapper};

/// A vendor's shop. Created by vendor action; never deleted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Shop {
    pub id: i64,
    #[schema(value_type = UuidWrapper)]
    pub vendor_id: Uuid,
    pub name: String,
    pub business_type: String,
    pub address: String,
    pub phone: Option<String>,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShopRequest {
    #[schema(example = "Mama's Kitchen")]
    pub name: String,
    #[schema(example = "restaurant")]
    pub business_type: String,
    #[schema(example = "12 Allen Avenue, Ikeja")]
    pub address: String,
    #[schema(example = "+234 801 234 5678")]
    pub phone: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
