use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::notification::service::NotificationService;
use crate::plan;
use crate::shop::{self, model::Shop};
use crate::whatsapp::service::WhatsAppClient;

use super::delivery::send_and_log;
use super::model::{resolve_phone, ActivityStatus, GrowthError, GrowthRule, ScanSummary};

#[derive(Debug, FromRow)]
struct VendorRow {
    id: Uuid,
    phone: Option<String>,
}

/// Evaluate the three performance rules for one vendor. Shop-absence and
/// activity-absence are mutually exclusive per run: the activity rule is only
/// considered when the vendor has shops, and an `Unknown` probe result
/// suppresses it.
fn evaluate_rules(plan_count: i64, shop_count: usize, activity: ActivityStatus) -> Vec<GrowthRule> {
    let mut rules = Vec::new();

    if plan_count == 0 {
        rules.push(GrowthRule::NoPlan);
    }

    if shop_count == 0 {
        rules.push(GrowthRule::NoShop);
    } else if activity == ActivityStatus::Inactive {
        rules.push(GrowthRule::NoActivity);
    }

    rules
}

/// Walks every vendor, evaluates the performance rules against their plans,
/// shops and orders, and emits deduplicated notifications. Holds no state
/// across invocations; each run recomputes from scratch.
#[derive(Clone)]
pub struct PerformanceScanner {
    pool: PgPool,
    notifications: Arc<NotificationService>,
    whatsapp: WhatsAppClient,
}

impl PerformanceScanner {
    pub fn new(
        pool: PgPool,
        notifications: Arc<NotificationService>,
        whatsapp: WhatsAppClient,
    ) -> Self {
        Self {
            pool,
            notifications,
            whatsapp,
        }
    }

    pub async fn scan(&self) -> Result<ScanSummary, GrowthError> {
        let vendors = sqlx::query_as::<_, VendorRow>(
            "SELECT id, phone FROM global.users WHERE role = 'vendor' ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        info!("Performance scan started for {} vendors", vendors.len());

        let vendors_checked = vendors.len();
        let mut auto_sent: u32 = 0;

        for vendor in vendors {
            let plan_count = plan::service::count_plans(&self.pool, vendor.id).await?;
            let shops = shop::service::list_shops(&self.pool, vendor.id).await?;

            let activity = if shops.is_empty() {
                // Not evaluated: the no-shop branch takes precedence.
                ActivityStatus::Unknown
            } else {
                self.shop_activity(&shops).await
            };

            for rule in evaluate_rules(plan_count, shops.len(), activity) {
                if self
                    .notifications
                    .has_rule_notification(vendor.id, rule.key())
                    .await?
                {
                    continue;
                }

                let notification = self
                    .notifications
                    .append(vendor.id, rule.kind(), Some(rule.key()), rule.message())
                    .await?;

                let phone = resolve_phone(vendor.phone.as_deref(), &shops);
                send_and_log(
                    &self.notifications,
                    &self.whatsapp,
                    &notification,
                    phone.as_deref(),
                    None,
                )
                .await?;

                auto_sent += 1;
            }
        }

        info!(
            "Performance scan finished: {} vendors checked, {} notifications sent",
            vendors_checked, auto_sent
        );

        Ok(ScanSummary {
            vendors_checked,
            auto_sent,
        })
    }

    /// Probe the vendor's shops for customer activity, short-circuiting on
    /// the first shop with at least one order. A count failure makes the
    /// whole probe `Unknown` rather than pretending there was no activity.
    async fn shop_activity(&self, shops: &[Shop]) -> ActivityStatus {
        for shop in shops {
            match self.count_shop_orders(shop.id).await {
                Ok(count) if count > 0 => return ActivityStatus::Active,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        "Order count failed for shop {}; treating activity as unknown: {}",
                        shop.id, e
                    );
                    return ActivityStatus::Unknown;
                }
            }
        }
        ActivityStatus::Inactive
    }

    async fn count_shop_orders(&self, shop_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT o.id) FROM global.orders o, jsonb_array_elements(o.items) item \
             WHERE (item->>'product_id')::bigint IN \
                   (SELECT id FROM global.products WHERE shop_id = $1)",
        )
        .bind(shop_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_with_nothing_gets_plan_and_shop_rules_only() {
        // 0 plans, 0 shops: the activity rule must not fire even if the probe
        // value claims inactivity, because the no-shop branch takes precedence.
        let rules = evaluate_rules(0, 0, ActivityStatus::Inactive);
        assert_eq!(rules, vec![GrowthRule::NoPlan, GrowthRule::NoShop]);
    }

    #[test]
    fn healthy_vendor_fires_nothing() {
        let rules = evaluate_rules(3, 2, ActivityStatus::Active);
        assert!(rules.is_empty());
    }

    #[test]
    fn inactive_shops_fire_activity_rule() {
        let rules = evaluate_rules(1, 3, ActivityStatus::Inactive);
        assert_eq!(rules, vec![GrowthRule::NoActivity]);
    }

    #[test]
    fn unknown_activity_is_suppressed() {
        let rules = evaluate_rules(1, 3, ActivityStatus::Unknown);
        assert!(rules.is_empty());
    }

    #[test]
    fn missing_plan_fires_alongside_activity() {
        let rules = evaluate_rules(0, 1, ActivityStatus::Inactive);
        assert_eq!(rules, vec![GrowthRule::NoPlan, GrowthRule::NoActivity]);
    }

    #[test]
    fn active_vendor_without_plan_only_gets_plan_rule() {
        let rules = evaluate_rules(0, 1, ActivityStatus::Active);
        assert_eq!(rules, vec![GrowthRule::NoPlan]);
    }
}
