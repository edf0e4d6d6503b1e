use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::notification::model::{NotificationError, NotificationKind};
use crate::plan::model::PlanError;
use crate::schema_ext::UuidWrapper;
use crate::shop::model::{Shop, ShopError};

/// The fixed rule set the pipeline evaluates. The rule key doubles as the
/// structured dedup key stored on every pipeline-generated notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthRule {
    NoPlan,
    NoShop,
    NoActivity,
    RevenueThreshold,
}

impl GrowthRule {
    pub fn key(&self) -> &'static str {
        match self {
            GrowthRule::NoPlan => "no_plan",
            GrowthRule::NoShop => "no_shop",
            GrowthRule::NoActivity => "no_activity",
            GrowthRule::RevenueThreshold => "revenue_threshold",
        }
    }

    pub fn kind(&self) -> NotificationKind {
        match self {
            GrowthRule::NoActivity => NotificationKind::Warning,
            _ => NotificationKind::Info,
        }
    }

    /// Message text for the three scanner rules. The revenue rule builds its
    /// message separately because it embeds the formatted amount.
    pub fn message(&self) -> &'static str {
        match self {
            GrowthRule::NoPlan => {
                "You haven't submitted any growth plan yet. Share a weekly plan so we can tailor growth advice for your business."
            }
            GrowthRule::NoShop => {
                "You haven't registered a shop yet. Register your first shop to start reaching customers."
            }
            GrowthRule::NoActivity => {
                "Your shops have no customer activity yet. Consider promotions to attract your first orders."
            }
            GrowthRule::RevenueThreshold => "reached the minimum revenue threshold",
        }
    }
}

/// Outcome of the customer-activity probe. A failed order-count query yields
/// `Unknown`, which suppresses the notification instead of being read as
/// "no activity".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityStatus {
    Active,
    Inactive,
    Unknown,
}

/// Summary returned by the performance scanner
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScanSummary {
    pub vendors_checked: usize,
    pub auto_sent: u32,
}

/// Per-vendor entry in the revenue monitor's result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueVendorResult {
    #[schema(value_type = UuidWrapper)]
    pub vendor_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub revenue: f64,
    pub whatsapp_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_error: Option<String>,
}

/// Summary returned by the revenue threshold monitor
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueCheckSummary {
    pub threshold: f64,
    pub notifications_sent: u32,
    pub vendors: Vec<RevenueVendorResult>,
}

#[derive(Debug, thiserror::Error)]
pub enum GrowthError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Notification error: {0}")]
    NotificationError(#[from] NotificationError),

    #[error("Shop lookup error: {0}")]
    ShopError(#[from] ShopError),

    #[error("Plan lookup error: {0}")]
    PlanError(#[from] PlanError),
}

/// Resolve the phone number used for delivery: the vendor's own number, else
/// the first registered shop's, else none.
pub fn resolve_phone(vendor_phone: Option<&str>, shops: &[Shop]) -> Option<String> {
    if let Some(phone) = vendor_phone {
        if !phone.trim().is_empty() {
            return Some(phone.to_string());
        }
    }
    shops
        .iter()
        .find_map(|shop| shop.phone.as_ref())
        .filter(|phone| !phone.trim().is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn shop(phone: Option<&str>) -> Shop {
        Shop {
            id: 1,
            vendor_id: Uuid::new_v4(),
            name: "shop".to_string(),
            business_type: "retail".to_string(),
            address: "somewhere".to_string(),
            phone: phone.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn vendor_phone_wins() {
        let shops = vec![shop(Some("0700000000"))];
        assert_eq!(
            resolve_phone(Some("0801234567"), &shops),
            Some("0801234567".to_string())
        );
    }

    #[test]
    fn first_shop_phone_is_fallback() {
        let shops = vec![shop(None), shop(Some("0700000001")), shop(Some("0700000002"))];
        assert_eq!(resolve_phone(None, &shops), Some("0700000001".to_string()));
    }

    #[test]
    fn no_phone_resolves_to_none() {
        assert_eq!(resolve_phone(None, &[]), None);
        assert_eq!(resolve_phone(Some("   "), &[shop(None)]), None);
    }

    #[test]
    fn rule_keys_are_stable() {
        assert_eq!(GrowthRule::NoPlan.key(), "no_plan");
        assert_eq!(GrowthRule::NoShop.key(), "no_shop");
        assert_eq!(GrowthRule::NoActivity.key(), "no_activity");
        assert_eq!(GrowthRule::RevenueThreshold.key(), "revenue_threshold");
    }

    #[test]
    fn messages_keep_their_historical_markers() {
        // Dedup no longer matches on message text, but the fixed wording is
        // still what vendors (and older tooling) recognize.
        assert!(GrowthRule::NoPlan
            .message()
            .contains("haven't submitted any growth plan"));
        assert!(GrowthRule::NoShop.message().contains("haven't registered a shop"));
        assert!(GrowthRule::NoActivity
            .message()
            .contains("no customer activity"));
        assert!(GrowthRule::RevenueThreshold
            .message()
            .contains("reached the minimum revenue threshold"));
    }
}
