use rand::{distr::Alphanumeric, Rng};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::cart;

use super::model::{Order, OrderError, OrderItem};

#[derive(Debug, FromRow)]
struct CheckoutRow {
    product_id: i64,
    name: String,
    quantity: i32,
    price: f64,
    vendor_id: Uuid,
}

fn generate_order_code() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("ORD-{}", suffix.to_uppercase())
}

/// Decide the order's vendor attribution: populated only when every line item
/// belongs to one vendor. Mixed carts stay unattributed and fall back to the
/// buyer id during revenue aggregation.
fn single_vendor(rows: &[CheckoutRow]) -> Option<Uuid> {
    let first = rows.first()?.vendor_id;
    rows.iter().all(|row| row.vendor_id == first).then_some(first)
}

/// Turn the user's cart into an immutable order.
pub async fn checkout(pool: &PgPool, user_id: Uuid) -> Result<Order, OrderError> {
    let rows = sqlx::query_as::<_, CheckoutRow>(
        "SELECT c.product_id, p.name, c.quantity, p.price, p.vendor_id \
         FROM global.cart_items c \
         JOIN global.products p ON p.id = c.product_id \
         WHERE c.user_id = $1 \
         ORDER BY c.created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let buyer = sqlx::query_as::<_, (String, String)>(
        "SELECT email, name FROM global.users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(OrderError::UserNotFound)?;

    let vendor_id = single_vendor(&rows);

    let items: Vec<OrderItem> = rows
        .iter()
        .map(|row| OrderItem {
            product_id: row.product_id,
            name: row.name.clone(),
            quantity: row.quantity,
            price: row.price,
        })
        .collect();

    let total: f64 = items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum();

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO global.orders \
         (order_code, user_id, vendor_id, user_email, user_name, items, total, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending') \
         RETURNING id, order_code, user_id, vendor_id, user_email, user_name, items, total, status, created_at",
    )
    .bind(generate_order_code())
    .bind(user_id)
    .bind(vendor_id)
    .bind(&buyer.0)
    .bind(&buyer.1)
    .bind(Json(&items))
    .bind(total)
    .fetch_one(pool)
    .await?;

    info!(
        "Order {} ({}) placed by user {} for {:.2}",
        order.id, order.order_code, user_id, total
    );

    // The order is durable at this point; a failed cart clear only leaves
    // stale cart rows behind.
    if let Err(e) = cart::service::clear_cart(pool, user_id).await {
        warn!("Failed to clear cart after checkout for {}: {}", user_id, e);
    }

    Ok(order)
}

/// List the user's own orders, newest first.
pub async fn list_orders(pool: &PgPool, user_id: Uuid) -> Result<Vec<Order>, OrderError> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, order_code, user_id, vendor_id, user_email, user_name, items, total, status, created_at \
         FROM global.orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product_id: i64, vendor: Uuid) -> CheckoutRow {
        CheckoutRow {
            product_id,
            name: format!("product-{}", product_id),
            quantity: 1,
            price: 100.0,
            vendor_id: vendor,
        }
    }

    #[test]
    fn order_code_has_prefix_and_length() {
        let code = generate_order_code();
        assert!(code.starts_with("ORD-"));
        assert_eq!(code.len(), 12);
        assert!(code[4..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn single_vendor_cart_is_attributed() {
        let vendor = Uuid::new_v4();
        let rows = vec![row(1, vendor), row(2, vendor)];
        assert_eq!(single_vendor(&rows), Some(vendor));
    }

    #[test]
    fn mixed_vendor_cart_is_unattributed() {
        let rows = vec![row(1, Uuid::new_v4()), row(2, Uuid::new_v4())];
        assert_eq!(single_vendor(&rows), None);
    }

    #[test]
    fn empty_cart_has_no_vendor() {
        assert_eq!(single_vendor(&[]), None);
    }
}
