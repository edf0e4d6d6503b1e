use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::model::{CreateInvestmentRequest, Investment, InvestmentError};

/// Record an investment for an investor account.
pub async fn create_investment(
    pool: &PgPool,
    investor_id: Uuid,
    data: CreateInvestmentRequest,
) -> Result<Investment, InvestmentError> {
    if data.business_name.trim().is_empty() {
        return Err(InvestmentError::ValidationError(
            "Business name is required".to_string(),
        ));
    }
    if data.amount <= 0.0 {
        return Err(InvestmentError::ValidationError(
            "Amount must be positive".to_string(),
        ));
    }

    let investment = sqlx::query_as::<_, Investment>(
        "INSERT INTO global.investments (investor_id, business_name, vendor_id, amount) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, investor_id, business_name, vendor_id, amount, created_at",
    )
    .bind(investor_id)
    .bind(data.business_name.trim())
    .bind(data.vendor_id)
    .bind(data.amount)
    .fetch_one(pool)
    .await?;

    info!(
        "Investment {} recorded for investor {}",
        investment.id, investor_id
    );
    Ok(investment)
}

/// List an investor's investments, newest first.
pub async fn list_investments(
    pool: &PgPool,
    investor_id: Uuid,
) -> Result<Vec<Investment>, InvestmentError> {
    let investments = sqlx::query_as::<_, Investment>(
        "SELECT id, investor_id, business_name, vendor_id, amount, created_at \
         FROM global.investments WHERE investor_id = $1 ORDER BY created_at DESC",
    )
    .bind(investor_id)
    .fetch_all(pool)
    .await?;

    Ok(investments)
}
