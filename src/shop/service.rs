use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::model::{CreateShopRequest, Shop, ShopError};

/// Register a new shop for a vendor.
pub async fn create_shop(
    pool: &PgPool,
    vendor_id: Uuid,
    data: CreateShopRequest,
) -> Result<Shop, ShopError> {
    if data.name.trim().is_empty() || data.business_type.trim().is_empty() {
        return Err(ShopError::ValidationError(
            "Shop name and business type are required".to_string(),
        ));
    }

    let shop = sqlx::query_as::<_, Shop>(
        "INSERT INTO global.shops (vendor_id, name, business_type, address, phone) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, vendor_id, name, business_type, address, phone, created_at",
    )
    .bind(vendor_id)
    .bind(data.name.trim())
    .bind(data.business_type.trim())
    .bind(&data.address)
    .bind(&data.phone)
    .fetch_one(pool)
    .await?;

    info!("Shop {} registered for vendor {}", shop.id, vendor_id);
    Ok(shop)
}

/// List a vendor's shops in registration order.
pub async fn list_shops(pool: &PgPool, vendor_id: Uuid) -> Result<Vec<Shop>, ShopError> {
    let shops = sqlx::query_as::<_, Shop>(
        "SELECT id, vendor_id, name, business_type, address, phone, created_at \
         FROM global.shops WHERE vendor_id = $1 ORDER BY created_at ASC",
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await?;

    Ok(shops)
}
