use tracing::info;

use crate::notification::model::{NewNotificationLog, Notification, NotificationError};
use crate::notification::service::NotificationService;
use crate::whatsapp::model::SendOutcome;
use crate::whatsapp::service::{sanitize_phone, WhatsAppClient};

pub(super) const NO_PHONE_ERROR: &str = "No phone number available for vendor";

/// Attempt delivery for an appended notification and write exactly one audit
/// row, phone or no phone, success or failure. Only the audit write itself
/// can fail here; gateway failures come back as data.
pub(super) async fn send_and_log(
    notifications: &NotificationService,
    whatsapp: &WhatsAppClient,
    notification: &Notification,
    phone: Option<&str>,
    revenue_context: Option<(f64, f64)>,
) -> Result<SendOutcome, NotificationError> {
    let (revenue, threshold) = match revenue_context {
        Some((revenue, threshold)) => (Some(revenue), Some(threshold)),
        None => (None, None),
    };

    let (vendor_phone, outcome) = match phone {
        None => (None, SendOutcome::failure(NO_PHONE_ERROR)),
        Some(raw) => {
            let digits = sanitize_phone(raw);
            let outcome = whatsapp.send(raw, &notification.message).await;
            (Some(digits), outcome)
        }
    };

    notifications
        .record_log(NewNotificationLog {
            notification_id: notification.id,
            vendor_id: notification.vendor_id,
            vendor_phone,
            message: notification.message.clone(),
            whatsapp_sent: outcome.success,
            whatsapp_error: outcome.error.clone(),
            revenue,
            threshold,
        })
        .await?;

    info!(
        "Delivery attempt for notification {} (vendor {}): sent={}",
        notification.id, notification.vendor_id, outcome.success
    );

    Ok(outcome)
}
