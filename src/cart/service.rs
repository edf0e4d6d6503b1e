use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::model::{AddCartItemRequest, CartError, CartItem, CartResponse};

/// Load a customer's cart with line totals.
pub async fn get_cart(pool: &PgPool, user_id: Uuid) -> Result<CartResponse, CartError> {
    let items = sqlx::query_as::<_, CartItem>(
        "SELECT c.id, c.product_id, p.name AS product_name, p.price, c.quantity, c.created_at \
         FROM global.cart_items c \
         JOIN global.products p ON p.id = c.product_id \
         WHERE c.user_id = $1 \
         ORDER BY c.created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let total = items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum();

    Ok(CartResponse { items, total })
}

/// Add a product to the cart; adding the same product again increments its
/// quantity.
pub async fn add_item(
    pool: &PgPool,
    user_id: Uuid,
    data: AddCartItemRequest,
) -> Result<CartResponse, CartError> {
    let quantity = data.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(CartError::ValidationError(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let product_exists = sqlx::query_as::<_, (bool,)>(
        "SELECT EXISTS(SELECT 1 FROM global.products WHERE id = $1)",
    )
    .bind(data.product_id)
    .fetch_one(pool)
    .await?
    .0;

    if !product_exists {
        return Err(CartError::ProductNotFound);
    }

    sqlx::query(
        "INSERT INTO global.cart_items (user_id, product_id, quantity) VALUES ($1, $2, $3) \
         ON CONFLICT (user_id, product_id) \
         DO UPDATE SET quantity = global.cart_items.quantity + EXCLUDED.quantity",
    )
    .bind(user_id)
    .bind(data.product_id)
    .bind(quantity)
    .execute(pool)
    .await?;

    info!(
        "Added product {} (x{}) to cart for user {}",
        data.product_id, quantity, user_id
    );

    get_cart(pool, user_id).await
}

/// Remove one cart row.
pub async fn remove_item(pool: &PgPool, user_id: Uuid, item_id: i64) -> Result<(), CartError> {
    let result = sqlx::query("DELETE FROM global.cart_items WHERE id = $1 AND user_id = $2")
        .bind(item_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CartError::ItemNotFound);
    }

    info!("Removed cart item {} for user {}", item_id, user_id);
    Ok(())
}

/// Empty the cart. Called after a successful checkout.
pub async fn clear_cart(pool: &PgPool, user_id: Uuid) -> Result<(), CartError> {
    sqlx::query("DELETE FROM global.cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}
