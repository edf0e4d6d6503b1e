use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema_ext::{DateTimeWrapper, UuidWrapper};

/// Notification severity as stored and served
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

/// A vendor notification. Append-only from the pipeline; the UI may flip
/// `read` from false to true.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i64,
    #[schema(value_type = UuidWrapper)]
    pub vendor_id: Uuid,
    pub message: String,
    /// "info" or "warning"
    #[serde(rename = "type")]
    pub kind: String,
    /// Structured dedup key for pipeline-generated notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub read: bool,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
}

/// Audit record: one row per delivery attempt, including attempts made with
/// no phone number on file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NotificationLog {
    pub id: i64,
    pub notification_id: i64,
    #[schema(value_type = UuidWrapper)]
    pub vendor_id: Uuid,
    pub vendor_phone: Option<String>,
    pub message: String,
    pub whatsapp_sent: bool,
    pub whatsapp_error: Option<String>,
    pub revenue: Option<f64>,
    pub threshold: Option<f64>,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
}

/// Fields for a new audit row
#[derive(Debug, Clone)]
pub struct NewNotificationLog {
    pub notification_id: i64,
    pub vendor_id: Uuid,
    pub vendor_phone: Option<String>,
    pub message: String,
    pub whatsapp_sent: bool,
    pub whatsapp_error: Option<String>,
    pub revenue: Option<f64>,
    pub threshold: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Notification not found")]
    NotFound,
}

/// Error response for the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationErrorResponse {
    pub error: String,
}
