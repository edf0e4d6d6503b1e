use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::model::{
    NewNotificationLog, Notification, NotificationError, NotificationKind, NotificationLog,
};

#[derive(Debug, Clone)]
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a notification to a vendor's list. A single INSERT, so two
    /// writers compose without a read-modify-write race.
    pub async fn append(
        &self,
        vendor_id: Uuid,
        kind: NotificationKind,
        rule: Option<&str>,
        message: &str,
    ) -> Result<Notification, NotificationError> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO global.notifications (vendor_id, message, kind, rule) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, vendor_id, message, kind, rule, read, created_at",
        )
        .bind(vendor_id)
        .bind(message)
        .bind(kind.as_str())
        .bind(rule)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Appended {} notification {} for vendor {}",
            notification.kind, notification.id, vendor_id
        );

        Ok(notification)
    }

    /// Whether a notification with the given rule key already exists for the
    /// vendor, ever. Used by the scanner rules, which never re-fire.
    pub async fn has_rule_notification(
        &self,
        vendor_id: Uuid,
        rule: &str,
    ) -> Result<bool, NotificationError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM global.notifications WHERE vendor_id = $1 AND rule = $2)",
        )
        .bind(vendor_id)
        .bind(rule)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Whether a notification with the given rule key exists for the vendor
    /// since `since`. Used by the revenue rule, which resets monthly.
    pub async fn has_rule_notification_since(
        &self,
        vendor_id: Uuid,
        rule: &str,
        since: DateTime<Utc>,
    ) -> Result<bool, NotificationError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM global.notifications \
             WHERE vendor_id = $1 AND rule = $2 AND created_at >= $3)",
        )
        .bind(vendor_id)
        .bind(rule)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// List a vendor's notifications, newest first.
    pub async fn list_for_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<Notification>, NotificationError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, vendor_id, message, kind, rule, read, created_at \
             FROM global.notifications WHERE vendor_id = $1 ORDER BY created_at DESC",
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Flip a notification's read flag to true. Flipping an already-read
    /// notification is a no-op success.
    pub async fn mark_read(
        &self,
        vendor_id: Uuid,
        notification_id: i64,
    ) -> Result<(), NotificationError> {
        let result = sqlx::query(
            "UPDATE global.notifications SET read = TRUE WHERE id = $1 AND vendor_id = $2",
        )
        .bind(notification_id)
        .bind(vendor_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(NotificationError::NotFound);
        }

        info!(
            "Notification {} marked read for vendor {}",
            notification_id, vendor_id
        );
        Ok(())
    }

    /// Write one audit row for a delivery attempt.
    pub async fn record_log(&self, log: NewNotificationLog) -> Result<(), NotificationError> {
        sqlx::query(
            "INSERT INTO global.notification_logs \
             (notification_id, vendor_id, vendor_phone, message, whatsapp_sent, whatsapp_error, revenue, threshold) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(log.notification_id)
        .bind(log.vendor_id)
        .bind(&log.vendor_phone)
        .bind(&log.message)
        .bind(log.whatsapp_sent)
        .bind(&log.whatsapp_error)
        .bind(log.revenue)
        .bind(log.threshold)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Most recent delivery-attempt logs (admin audit view).
    pub async fn list_logs(&self, limit: i64) -> Result<Vec<NotificationLog>, NotificationError> {
        let logs = sqlx::query_as::<_, NotificationLog>(
            "SELECT id, notification_id, vendor_id, vendor_phone, message, \
             whatsapp_sent, whatsapp_error, revenue, threshold, created_at \
             FROM global.notification_logs ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
