use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema_ext::UuidWrapper;

/// A vendor's revenue position for the current local calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RevenueSummary {
    #[schema(value_type = UuidWrapper)]
    pub vendor_id: Uuid,
    /// Local calendar month bucket, e.g. "2026-08"
    #[schema(example = "2026-08")]
    pub month: String,
    pub revenue: f64,
    pub threshold: f64,
    pub threshold_reached: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RevenueError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
