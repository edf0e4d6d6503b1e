use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema_ext::{DateTimeWrapper, JsonWrapper, UuidWrapper};

/// A weekly growth plan. The content payload is opaque to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WeeklyPlan {
    pub id: i64,
    #[schema(value_type = UuidWrapper)]
    pub user_id: Uuid,
    pub business_type: String,
    #[schema(value_type = JsonWrapper)]
    pub content: serde_json::Value,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePlanRequest {
    #[schema(example = "restaurant")]
    pub business_type: String,
    #[schema(value_type = JsonWrapper)]
    pub content: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
