use chrono::Local;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::cache::redis::RedisCache;
use crate::growth::monitor::{month_bucket, month_window, order_revenue, OrderRevenueRow};

use super::model::{RevenueError, RevenueSummary};

#[derive(Clone)]
pub struct RevenueService {
    pool: PgPool,
    redis_cache: Option<RedisCache>,
    threshold: f64,
}

impl RevenueService {
    pub fn new(pool: PgPool, redis_cache: Option<RedisCache>, threshold: f64) -> Self {
        Self {
            pool,
            redis_cache,
            threshold,
        }
    }

    /// Current-month revenue for one vendor, using the same attribution chain
    /// as the threshold monitor: orders explicitly tagged with the vendor id,
    /// plus untagged orders whose owning user is the vendor.
    pub async fn vendor_summary(&self, vendor_id: Uuid) -> Result<RevenueSummary, RevenueError> {
        let month = month_bucket(Local::now());

        if let Some(cache) = &self.redis_cache {
            match cache.get_vendor_revenue(vendor_id, &month).await {
                Ok(Some(cached)) => {
                    if let Ok(summary) = serde_json::from_str::<RevenueSummary>(&cached) {
                        return Ok(summary);
                    }
                    warn!("Cached revenue summary for {} is unreadable", vendor_id);
                }
                Ok(None) => {}
                Err(e) => warn!("Cache read failed for vendor revenue: {}", e),
            }
        }

        let (month_start, month_end) = month_window(Local::now());
        let rows = sqlx::query_as::<_, OrderRevenueRow>(
            "SELECT vendor_id, user_id, items FROM global.orders \
             WHERE created_at >= $1 AND created_at < $2 \
             AND (vendor_id = $3 OR (vendor_id IS NULL AND user_id = $3))",
        )
        .bind(month_start)
        .bind(month_end)
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        let revenue: f64 = rows.iter().map(|row| order_revenue(&row.items)).sum();

        let summary = RevenueSummary {
            vendor_id,
            month,
            revenue,
            threshold: self.threshold,
            threshold_reached: revenue >= self.threshold,
        };

        if let Some(cache) = &self.redis_cache {
            if let Ok(json) = serde_json::to_string(&summary) {
                if let Err(e) = cache
                    .cache_vendor_revenue(vendor_id, &summary.month, &json)
                    .await
                {
                    warn!("Failed to cache revenue summary for {}: {}", vendor_id, e);
                }
            }
        }

        Ok(summary)
    }
}
