use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema_ext::{DateTimeWrapper, UuidWrapper};

/// An investor's stake in a business.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Investment {
    pub id: i64,
    #[schema(value_type = UuidWrapper)]
    pub investor_id: Uuid,
    pub business_name: String,
    #[schema(value_type = Option<UuidWrapper>)]
    pub vendor_id: Option<Uuid>,
    pub amount: f64,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInvestmentRequest {
    #[schema(example = "Mama's Kitchen")]
    pub business_name: String,
    #[schema(value_type = Option<UuidWrapper>)]
    pub vendor_id: Option<Uuid>,
    #[schema(example = "250000.0")]
    pub amount: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum InvestmentError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
