use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::notification::service::NotificationService;
use crate::order::model::OrderItem;
use crate::shop;
use crate::whatsapp::service::WhatsAppClient;

use super::delivery::send_and_log;
use super::model::{
    resolve_phone, GrowthError, GrowthRule, RevenueCheckSummary, RevenueVendorResult,
};

pub const DEFAULT_REVENUE_THRESHOLD: f64 = 50_000.0;

/// Read the configured revenue threshold, falling back to the default.
pub fn threshold_from_env() -> f64 {
    std::env::var("REVENUE_THRESHOLD")
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or(DEFAULT_REVENUE_THRESHOLD)
}

/// The current calendar month of the invoking process's local clock, as a
/// half-open UTC interval. The local calendar is deliberate: month boundaries
/// follow the server's timezone, not UTC.
pub fn month_window(now: DateTime<Local>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = now.date_naive();
    let start = date.with_day(1).unwrap().and_hms_opt(0, 0, 0).unwrap();

    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let end = chrono::NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    (local_to_utc(start), local_to_utc(end))
}

fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Local midnight can be skipped by a DST jump; fall back to reading
        // the naive timestamp as UTC.
        None => DateTime::from_naive_utc_and_offset(naive, Utc),
    }
}

/// "YYYY-MM" bucket of the local calendar month, used as a cache key.
pub fn month_bucket(now: DateTime<Local>) -> String {
    format!("{:04}-{:02}", now.year(), now.month())
}

/// One order as seen by the revenue aggregation.
#[derive(Debug, FromRow)]
pub struct OrderRevenueRow {
    pub vendor_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub items: Json<Vec<OrderItem>>,
}

/// The effective vendor id an order's revenue accrues to. The fallback chain
/// (vendor_id, then user_id, then "unknown") conflates the purchaser with the
/// vendor when no explicit vendor id is set; this is a single-vendor-
/// marketplace assumption carried over deliberately.
pub fn effective_vendor_key(vendor_id: Option<Uuid>, user_id: Option<Uuid>) -> String {
    vendor_id
        .map(|id| id.to_string())
        .or_else(|| user_id.map(|id| id.to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Revenue of a single order: price × quantity summed over line items.
pub fn order_revenue(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum()
}

/// Fold a month's orders into per-vendor running totals.
pub fn aggregate_monthly_revenue(rows: &[OrderRevenueRow]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for row in rows {
        let key = effective_vendor_key(row.vendor_id, row.user_id);
        *totals.entry(key).or_insert(0.0) += order_revenue(&row.items);
    }
    totals
}

/// Format an amount with thousands separators; cents only when present.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = (cents / 100).abs();
    let fraction = (cents % 100).abs();
    let sign = if cents < 0 { "-" } else { "" };

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fraction == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, fraction)
    }
}

#[derive(Debug, FromRow)]
struct VendorAccountRow {
    name: String,
    phone: Option<String>,
    role: String,
}

/// Aggregates current-month order totals per vendor and fires a one-time-per-
/// month congratulatory notification for vendors at or above the threshold.
#[derive(Clone)]
pub struct RevenueMonitor {
    pool: PgPool,
    notifications: Arc<NotificationService>,
    whatsapp: WhatsAppClient,
    threshold: f64,
}

impl RevenueMonitor {
    pub fn new(
        pool: PgPool,
        notifications: Arc<NotificationService>,
        whatsapp: WhatsAppClient,
        threshold: f64,
    ) -> Self {
        Self {
            pool,
            notifications,
            whatsapp,
            threshold,
        }
    }

    pub async fn check(&self) -> Result<RevenueCheckSummary, GrowthError> {
        let (month_start, month_end) = month_window(Local::now());

        let rows = sqlx::query_as::<_, OrderRevenueRow>(
            "SELECT vendor_id, user_id, items FROM global.orders \
             WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(month_start)
        .bind(month_end)
        .fetch_all(&self.pool)
        .await?;

        info!(
            "Revenue check started: {} orders in the current month, threshold {}",
            rows.len(),
            self.threshold
        );

        let totals = aggregate_monthly_revenue(&rows);
        let mut entries: Vec<(String, f64)> = totals.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut notifications_sent: u32 = 0;
        let mut vendors = Vec::new();

        for (key, revenue) in entries {
            // Inclusive comparison: hitting the threshold exactly counts.
            if revenue < self.threshold {
                continue;
            }

            let vendor_id = match Uuid::parse_str(&key) {
                Ok(id) => id,
                Err(_) => {
                    warn!(
                        "Skipping revenue bucket '{}' with no attributable vendor ({})",
                        key,
                        format_amount(revenue)
                    );
                    continue;
                }
            };

            let account = sqlx::query_as::<_, VendorAccountRow>(
                "SELECT name, phone, role FROM global.users WHERE id = $1",
            )
            .bind(vendor_id)
            .fetch_optional(&self.pool)
            .await?;

            let account = match account {
                Some(account) => account,
                None => {
                    warn!("Revenue bucket {} has no matching account", vendor_id);
                    continue;
                }
            };

            if account.role != "vendor" {
                info!(
                    "Revenue bucket {} belongs to a {} account; skipping",
                    vendor_id, account.role
                );
                continue;
            }

            // The revenue rule resets monthly: only suppress when the vendor
            // was already congratulated within the current month.
            if self
                .notifications
                .has_rule_notification_since(
                    vendor_id,
                    GrowthRule::RevenueThreshold.key(),
                    month_start,
                )
                .await?
            {
                continue;
            }

            let message = format!(
                "Congratulations {}! Your business has reached the minimum revenue threshold for this month with {} in sales. Keep it up!",
                account.name,
                format_amount(revenue)
            );

            let notification = self
                .notifications
                .append(
                    vendor_id,
                    GrowthRule::RevenueThreshold.kind(),
                    Some(GrowthRule::RevenueThreshold.key()),
                    &message,
                )
                .await?;

            let shops = shop::service::list_shops(&self.pool, vendor_id).await?;
            let phone = resolve_phone(account.phone.as_deref(), &shops);

            let outcome = send_and_log(
                &self.notifications,
                &self.whatsapp,
                &notification,
                phone.as_deref(),
                Some((revenue, self.threshold)),
            )
            .await?;

            notifications_sent += 1;
            vendors.push(RevenueVendorResult {
                vendor_id,
                name: account.name,
                phone,
                revenue,
                whatsapp_sent: outcome.success,
                whatsapp_error: outcome.error,
            });
        }

        info!(
            "Revenue check finished: {} vendors congratulated",
            notifications_sent
        );

        Ok(RevenueCheckSummary {
            threshold: self.threshold,
            notifications_sent,
            vendors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            product_id: 1,
            name: "item".to_string(),
            quantity,
            price,
        }
    }

    fn order(
        vendor_id: Option<Uuid>,
        user_id: Option<Uuid>,
        items: Vec<OrderItem>,
    ) -> OrderRevenueRow {
        OrderRevenueRow {
            vendor_id,
            user_id,
            items: Json(items),
        }
    }

    #[test]
    fn vendor_id_wins_over_user_id() {
        let vendor = Uuid::new_v4();
        let buyer = Uuid::new_v4();
        assert_eq!(
            effective_vendor_key(Some(vendor), Some(buyer)),
            vendor.to_string()
        );
    }

    #[test]
    fn user_id_is_the_fallback() {
        let buyer = Uuid::new_v4();
        assert_eq!(effective_vendor_key(None, Some(buyer)), buyer.to_string());
    }

    #[test]
    fn unattributed_orders_bucket_as_unknown() {
        assert_eq!(effective_vendor_key(None, None), "unknown");
    }

    #[test]
    fn revenue_is_price_times_quantity_over_items() {
        let items = vec![item(1000.0, 3), item(250.5, 2)];
        assert!((order_revenue(&items) - 3501.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregation_accumulates_per_vendor() {
        let vendor = Uuid::new_v4();
        let other = Uuid::new_v4();
        let rows = vec![
            order(Some(vendor), None, vec![item(100.0, 1)]),
            order(Some(vendor), Some(other), vec![item(200.0, 2)]),
            order(None, Some(other), vec![item(50.0, 1)]),
            order(None, None, vec![item(10.0, 1)]),
        ];

        let totals = aggregate_monthly_revenue(&rows);
        assert_eq!(totals.len(), 3);
        assert!((totals[&vendor.to_string()] - 500.0).abs() < f64::EPSILON);
        assert!((totals[&other.to_string()] - 50.0).abs() < f64::EPSILON);
        assert!((totals["unknown"] - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn month_window_spans_the_local_month() {
        let now = Local.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap();
        let (start, end) = month_window(now);

        let start_local = start.with_timezone(&Local);
        let end_local = end.with_timezone(&Local);
        assert_eq!((start_local.year(), start_local.month(), start_local.day()), (2026, 1, 1));
        assert_eq!((end_local.year(), end_local.month(), end_local.day()), (2026, 2, 1));
        assert!(start < end);
        assert!(start <= now.with_timezone(&Utc) && now.with_timezone(&Utc) < end);
    }

    #[test]
    fn month_window_rolls_over_the_year() {
        let now = Local.with_ymd_and_hms(2025, 12, 31, 23, 0, 0).unwrap();
        let (start, end) = month_window(now);

        let start_local = start.with_timezone(&Local);
        let end_local = end.with_timezone(&Local);
        assert_eq!((start_local.year(), start_local.month()), (2025, 12));
        assert_eq!((end_local.year(), end_local.month(), end_local.day()), (2026, 1, 1));
    }

    #[test]
    fn month_bucket_is_zero_padded() {
        let now = Local.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        assert_eq!(month_bucket(now), "2026-03");
    }

    #[test]
    fn amounts_get_thousands_separators() {
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(50_000.0), "50,000");
        assert_eq!(format_amount(1_234_567.5), "1,234,567.50");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn threshold_env_parsing_falls_back_to_default() {
        std::env::remove_var("REVENUE_THRESHOLD");
        assert!((threshold_from_env() - DEFAULT_REVENUE_THRESHOLD).abs() < f64::EPSILON);

        std::env::set_var("REVENUE_THRESHOLD", "75000");
        assert!((threshold_from_env() - 75_000.0).abs() < f64::EPSILON);

        std::env::set_var("REVENUE_THRESHOLD", "not-a-number");
        assert!((threshold_from_env() - DEFAULT_REVENUE_THRESHOLD).abs() < f64::EPSILON);

        std::env::remove_var("REVENUE_THRESHOLD");
    }
}
