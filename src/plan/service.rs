use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::model::{CreatePlanRequest, PlanError, WeeklyPlan};

/// Submit a weekly growth plan.
pub async fn create_plan(
    pool: &PgPool,
    user_id: Uuid,
    data: CreatePlanRequest,
) -> Result<WeeklyPlan, PlanError> {
    if data.business_type.trim().is_empty() {
        return Err(PlanError::ValidationError(
            "Business type is required".to_string(),
        ));
    }

    let plan = sqlx::query_as::<_, WeeklyPlan>(
        "INSERT INTO global.weekly_plans (user_id, business_type, content) \
         VALUES ($1, $2, $3) \
         RETURNING id, user_id, business_type, content, created_at",
    )
    .bind(user_id)
    .bind(data.business_type.trim())
    .bind(&data.content)
    .fetch_one(pool)
    .await?;

    info!("Weekly plan {} submitted by user {}", plan.id, user_id);
    Ok(plan)
}

/// List the user's plans, newest first.
pub async fn list_plans(pool: &PgPool, user_id: Uuid) -> Result<Vec<WeeklyPlan>, PlanError> {
    let plans = sqlx::query_as::<_, WeeklyPlan>(
        "SELECT id, user_id, business_type, content, created_at \
         FROM global.weekly_plans WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(plans)
}

/// Count the plans a vendor has submitted. Used by the performance scanner.
pub async fn count_plans(pool: &PgPool, user_id: Uuid) -> Result<i64, PlanError> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM global.weekly_plans WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}
